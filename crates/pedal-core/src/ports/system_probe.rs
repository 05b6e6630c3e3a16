//! System probe port for dependency detection.
//!
//! - Core owns the trait and types (pure)
//! - Runtime owns the implementation (active probing via `Command::new`)
//! - CLI injects the probe via main.rs

use crate::utils::system::Dependency;

/// Port for probing the tools and libraries pedal-assistant relies on.
pub trait SystemProbePort: Send + Sync {
    /// Check all dependencies and return their status, version and hints.
    fn check_all_dependencies(&self) -> Vec<Dependency>;
}
