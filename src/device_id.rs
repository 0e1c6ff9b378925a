// SPDX-License-Identifier: GPL-2.0
//! USB vendor/product identifiers and the unbind allow-list

use std::fmt;

use crate::error::UeventError;

/// XP-Pen Deco01 tablet
pub const VID_XP_PEN: u16 = 0x28BD;
pub const PID_DECO01: u16 = 0x0042;

/// Devices that get detached from usbhid
pub const ALLOW_LIST: &[DeviceId] = &[DeviceId::new(VID_XP_PEN, PID_DECO01)];

/// VID/PID pair
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId {
    vendor: u16,
    product: u16,
}

impl DeviceId {
    pub const fn new(vendor: u16, product: u16) -> Self {
        Self { vendor, product }
    }

    pub fn vendor(&self) -> u16 {
        self.vendor
    }

    pub fn product(&self) -> u16 {
        self.product
    }

    /// Decode a uevent `PRODUCT` value (`vendor/product/version`, hex).
    ///
    /// Only the first two components are used; the version is ignored.
    pub fn from_product(value: &str) -> Result<Self, UeventError> {
        let mut parts = value.split('/');
        let (Some(vendor), Some(product)) = (parts.next(), parts.next()) else {
            return Err(UeventError::MalformedProduct(value.to_string()));
        };

        Ok(Self {
            vendor: parse_hex("vendor", vendor)?,
            product: parse_hex("product", product)?,
        })
    }

    /// Exact match against a list of IDs
    pub fn allowed(&self, list: &[DeviceId]) -> bool {
        list.contains(self)
    }
}

fn parse_hex(field: &'static str, value: &str) -> Result<u16, UeventError> {
    u16::from_str_radix(value, 16).map_err(|_| UeventError::InvalidHex {
        field,
        value: value.to_string(),
    })
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{:04X}", self.vendor, self.product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_product_without_padding() {
        let id = DeviceId::from_product("28bd/42/111").unwrap();
        assert_eq!(id.vendor(), 0x28BD);
        assert_eq!(id.product(), 0x0042);
    }

    #[test]
    fn accepts_uppercase_and_padded_hex() {
        let id = DeviceId::from_product("046D/C52B/1211").unwrap();
        assert_eq!(id, DeviceId::new(0x046D, 0xC52B));
    }

    #[test]
    fn version_is_optional() {
        assert_eq!(
            DeviceId::from_product("28bd/42").unwrap(),
            DeviceId::new(0x28BD, 0x0042)
        );
    }

    #[test]
    fn single_component_is_malformed() {
        assert_eq!(
            DeviceId::from_product("28bd").unwrap_err(),
            UeventError::MalformedProduct("28bd".to_string())
        );
    }

    #[test]
    fn non_hex_component_is_rejected() {
        assert_eq!(
            DeviceId::from_product("28bd/zz/111").unwrap_err(),
            UeventError::InvalidHex {
                field: "product",
                value: "zz".to_string()
            }
        );
        // Wider than 16 bits
        assert!(DeviceId::from_product("128bd/42/111").is_err());
    }

    #[test]
    fn display_is_zero_padded_uppercase() {
        assert_eq!(DeviceId::new(0x28BD, 0x0042).to_string(), "28BD:0042");
        assert_eq!(DeviceId::new(0x0001, 0x000a).to_string(), "0001:000A");
    }

    #[test]
    fn allow_list_matches_exactly() {
        assert!(DeviceId::new(0x28BD, 0x0042).allowed(ALLOW_LIST));
        assert!(!DeviceId::new(0x28BD, 0x0043).allowed(ALLOW_LIST));
        assert!(!DeviceId::new(0x28BE, 0x0042).allowed(ALLOW_LIST));
        assert!(!DeviceId::new(0x28BD, 0x0042).allowed(&[]));
    }
}
