//! Core error type shared across adapters.

use crate::paths::PathError;
use crate::profile::ProfileError;
use crate::settings::SettingsError;

/// Errors crossing the core/adapter boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Path resolution error.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Profile load/save error.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Input device error.
    #[error("Input device error: {0}")]
    Device(String),

    /// Failed to start or wait for an external process.
    #[error("Process error: {0}")]
    Process(String),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
