//! Command handlers.
//!
//! Each handler is a thin wrapper that:
//! 1. Builds the adapters it needs from the stored settings
//! 2. Calls into the core, audio, input or runtime crates
//! 3. Formats output for the terminal

pub mod check_deps;
pub mod config;
pub mod devices;
pub mod handler;
pub mod launch;
pub mod paths;
pub mod run;
pub mod tone;
