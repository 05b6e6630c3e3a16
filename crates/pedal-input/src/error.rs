//! Input error types.

use std::path::PathBuf;

use pedal_core::CoreError;

/// Errors raised by the input layer.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The platform gamepad backend failed to initialise.
    #[error("Gamepad backend error: {0}")]
    Backend(String),

    /// A replay file could not be read.
    #[error("Failed to read replay file {path}: {reason}")]
    ReplayRead { path: PathBuf, reason: String },

    /// A replay line is not a valid frame.
    #[error("Invalid replay frame at {path}:{line}: {reason}")]
    ReplayParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A replay file holds no frames.
    #[error("Replay file {0} contains no frames")]
    EmptyReplay(PathBuf),

    /// Failed to start the reader thread.
    #[error("Failed to spawn input thread: {0}")]
    ThreadSpawn(String),

    /// The reader thread exited and no longer answers.
    #[error("Input thread is no longer running")]
    ReaderThreadDied,
}

impl From<InputError> for CoreError {
    fn from(err: InputError) -> Self {
        Self::Device(err.to_string())
    }
}
