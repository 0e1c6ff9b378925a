// SPDX-License-Identifier: GPL-2.0
//! usbhid driver directory in sysfs
//!
//! `/sys/bus/usb/drivers/usbhid/` holds one symlink per bound interface
//! (named like `1-1.2:1.0`), the `module` link, and the control files
//! `bind`, `unbind`, `new_id`, `remove_id` and `uevent`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::device_id::DeviceId;
use crate::uevent::Uevent;

/// Default location of the usbhid driver
pub const USBHID_DRIVER_DIR: &str = "/sys/bus/usb/drivers/usbhid";

/// Report name when the directory has no final component
const DEFAULT_DRIVER_NAME: &str = "usbhid";

/// Link to the owning kernel module, present in every driver directory
const MODULE_ENTRY: &str = "module";

const UNBIND_FILE: &str = "unbind";
const UEVENT_FILE: &str = "uevent";

/// An interface currently bound to the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundDevice {
    /// sysfs directory name, also the unbind payload
    pub handle: String,
    pub id: DeviceId,
}

/// Detaches driver instances
pub trait DriverControl {
    /// Driver name used in reports
    fn name(&self) -> &str;

    /// Ask the kernel to detach `handle` from this driver
    fn unbind(&mut self, handle: &str) -> Result<()>;
}

/// A driver directory such as `/sys/bus/usb/drivers/usbhid`
#[derive(Debug, Clone)]
pub struct SysfsDriver {
    dir: PathBuf,
    name: String,
}

impl SysfsDriver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_DRIVER_NAME.to_string());
        Self { dir, name }
    }

    pub fn usbhid() -> Self {
        Self::new(USBHID_DRIVER_DIR)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of bound instances, sorted
    pub fn bound_handles(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list {}", self.dir.display()))?;

        let mut handles = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("Failed to list {}", self.dir.display()))?;

            // Bindings are symlinks, so follow them
            if !entry.path().is_dir() {
                continue;
            }

            // The handle is written back verbatim, so it must survive as text
            let name = entry.file_name().into_string().map_err(|raw| {
                anyhow!("Non-UTF-8 binding name {:?} in {}", raw, self.dir.display())
            })?;
            if name == MODULE_ENTRY {
                continue;
            }

            debug!("Found binding {}", name);
            handles.push(name);
        }

        handles.sort();
        Ok(handles)
    }

    /// Parsed `uevent` of one bound instance
    pub fn read_uevent(&self, handle: &str) -> Result<Uevent> {
        Uevent::read(&self.dir.join(handle).join(UEVENT_FILE))
    }

    /// Every bound instance with its vendor/product ID
    pub fn scan(&self) -> Result<Vec<BoundDevice>> {
        self.bound_handles()?
            .into_iter()
            .map(|handle| -> Result<BoundDevice> {
                let id = self
                    .read_uevent(&handle)?
                    .device_id()
                    .with_context(|| format!("Bad PRODUCT for {handle}"))?;
                debug!("  {} -> {}", handle, id);
                Ok(BoundDevice { handle, id })
            })
            .collect()
    }
}

impl DriverControl for SysfsDriver {
    fn name(&self) -> &str {
        &self.name
    }

    fn unbind(&mut self, handle: &str) -> Result<()> {
        let path = self.dir.join(UNBIND_FILE);
        debug!("Writing {:?} to {}", handle, path.display());

        // sysfs attributes must not be created or truncated
        let mut f = OpenOptions::new()
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        f.write_all(handle.as_bytes())
            .with_context(|| format!("Failed to unbind {handle} via {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_comes_from_last_component() {
        assert_eq!(SysfsDriver::usbhid().name(), "usbhid");
        assert_eq!(SysfsDriver::new("/tmp/fake/usbhid/").name(), "usbhid");
        assert_eq!(
            SysfsDriver::usbhid().dir(),
            Path::new("/sys/bus/usb/drivers/usbhid")
        );
    }

    #[test]
    fn name_falls_back_without_final_component() {
        assert_eq!(SysfsDriver::new(".").name(), "usbhid");
        assert_eq!(SysfsDriver::new("/").name(), "usbhid");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let driver = SysfsDriver::new("/nonexistent/usbhid-unbind/usbhid");
        let err = driver.bound_handles().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/usbhid-unbind/usbhid"));
    }
}
