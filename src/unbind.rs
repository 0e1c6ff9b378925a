// SPDX-License-Identifier: GPL-2.0
//! Filter scanned devices against the allow-list and detach matches

use std::io::Write;

use anyhow::Result;
use tracing::{debug, info};

use crate::device_id::DeviceId;
use crate::driver::{BoundDevice, DriverControl};

/// Unbind every device on `allow_list`, writing one report line per device.
///
/// With `dry_run` nothing is written to the driver. Stops at the first
/// failure; devices already detached stay detached.
pub fn unbind_matching<D, W>(
    devices: &[BoundDevice],
    allow_list: &[DeviceId],
    driver: &mut D,
    out: &mut W,
    dry_run: bool,
) -> Result<Vec<BoundDevice>>
where
    D: DriverControl + ?Sized,
    W: Write + ?Sized,
{
    let mut unbound = Vec::new();

    for device in devices {
        if !device.id.allowed(allow_list) {
            debug!("Skipping {} ({})", device.handle, device.id);
            continue;
        }

        if dry_run {
            writeln!(
                out,
                "{} ({}) : would unbind from {}",
                device.handle,
                device.id,
                driver.name()
            )?;
        } else {
            driver.unbind(&device.handle)?;
            writeln!(
                out,
                "{} ({}) : unbound from {}",
                device.handle,
                device.id,
                driver.name()
            )?;
        }
        unbound.push(device.clone());
    }

    info!(
        "{} of {} bound device(s) matched",
        unbound.len(),
        devices.len()
    );
    Ok(unbound)
}

/// One line per bound device, flagging allow-list matches
pub fn list_devices<W: Write + ?Sized>(
    devices: &[BoundDevice],
    allow_list: &[DeviceId],
    out: &mut W,
) -> Result<()> {
    for device in devices {
        let flag = if device.id.allowed(allow_list) {
            " [match]"
        } else {
            ""
        };
        writeln!(out, "{} ({}){}", device.handle, device.id, flag)?;
    }
    Ok(())
}
