//! Input device descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A connected input device as listed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Backend-assigned device index.
    pub index: usize,
    pub name: String,
}

impl DeviceInfo {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Renders as `"{index}: {name}"`, the form accepted by [`parse_device_selection`].
impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.index, self.name)
    }
}

/// Extract the device index from a `"{index}: {name}"` selection.
///
/// A bare number is accepted as well.
pub fn parse_device_selection(selection: &str) -> Option<usize> {
    let head = selection.split(':').next()?;
    head.trim().parse().ok()
}
