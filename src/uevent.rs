// SPDX-License-Identifier: GPL-2.0
//! `uevent` attribute parsing
//!
//! Every device directory in sysfs carries a `uevent` file of `KEY=VALUE`
//! lines. For a USB interface bound to usbhid it looks like:
//!
//! ```text
//! DEVTYPE=usb_interface
//! DRIVER=usbhid
//! PRODUCT=28bd/42/111
//! TYPE=0/0/0
//! INTERFACE=3/0/0
//! MODALIAS=usb:v28BDp0042d0111dc00dsc00dp00ic03isc00ip00in01
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::device_id::DeviceId;
use crate::error::UeventError;

/// Key holding `vendor/product/version` in hex
pub const PRODUCT_KEY: &str = "PRODUCT";

/// Parsed contents of a `uevent` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uevent {
    fields: HashMap<String, String>,
}

impl Uevent {
    /// Parse `KEY=VALUE` lines, splitting each on the first `=`
    pub fn parse(text: &str) -> Result<Self, UeventError> {
        let mut fields = HashMap::new();
        for line in text.lines() {
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| UeventError::MalformedLine(line.to_string()))?;
            fields.insert(key.to_string(), value.to_string());
        }
        Ok(Self { fields })
    }

    /// Read and parse a `uevent` file
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Raw `PRODUCT` value
    pub fn product(&self) -> Result<&str, UeventError> {
        self.get(PRODUCT_KEY)
            .ok_or_else(|| UeventError::MissingKey(PRODUCT_KEY.to_string()))
    }

    /// Vendor/product pair decoded from `PRODUCT`
    pub fn device_id(&self) -> Result<DeviceId, UeventError> {
        DeviceId::from_product(self.product()?)
    }
}
