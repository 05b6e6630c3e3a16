#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod backend;
pub mod error;
pub mod reader;

#[cfg(test)]
use tempfile as _;

// Re-export key types for convenience
pub use backend::{InputBackend, ReplayFrame};
pub use error::InputError;
pub use reader::{AxisReader, POLL_INTERVAL, normalize_axis};
