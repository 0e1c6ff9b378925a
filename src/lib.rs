// SPDX-License-Identifier: GPL-2.0
//! Detach allow-listed USB HID interfaces from the generic usbhid driver
//!
//! Scans `/sys/bus/usb/drivers/usbhid/`, decodes each bound interface's
//! `PRODUCT` from its `uevent`, and writes matching interface names to the
//! driver's `unbind` file so a dedicated driver can claim them.

pub mod device_id;
pub mod driver;
pub mod error;
pub mod uevent;
pub mod unbind;

pub use device_id::{DeviceId, ALLOW_LIST};
pub use driver::{BoundDevice, DriverControl, SysfsDriver, USBHID_DRIVER_DIR};
pub use error::UeventError;
pub use uevent::Uevent;
pub use unbind::{list_devices, unbind_matching};
