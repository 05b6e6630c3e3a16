//! Shared utility types.

pub mod system;
