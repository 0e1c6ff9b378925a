// SPDX-License-Identifier: GPL-2.0
//! Parse errors for sysfs attribute files

use thiserror::Error;

/// Errors raised while interpreting a device's `uevent` contents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UeventError {
    #[error("uevent has no {0} key")]
    MissingKey(String),

    #[error("malformed uevent line (expected KEY=VALUE): {0:?}")]
    MalformedLine(String),

    #[error("malformed PRODUCT value (expected vendor/product/version): {0:?}")]
    MalformedProduct(String),

    #[error("invalid hex {field} ID: {value:?}")]
    InvalidHex { field: &'static str, value: String },
}
