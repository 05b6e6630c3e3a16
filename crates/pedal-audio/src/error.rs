//! Audio error types.

/// Errors raised by the audio output layer.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// No audio output device found.
    #[error("No audio output device found")]
    NoOutputDevice,

    /// Failed to query or open the output stream.
    #[error("Failed to open audio output stream: {0}")]
    OutputStreamError(String),

    /// The device offers a sample format the mixer cannot write.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Failed to enumerate devices.
    #[error("Failed to list audio devices: {0}")]
    DeviceList(String),

    /// Failed to start the audio thread.
    #[error("Failed to spawn audio thread: {0}")]
    ThreadSpawn(String),

    /// The audio thread exited and no longer answers.
    #[error("Audio thread is no longer running")]
    AudioThreadDied,
}
