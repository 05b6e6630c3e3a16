//! Port definitions for adapter implementations.
//!
//! Core owns the traits; adapters implement them:
//!
//! | Port | Implemented by |
//! |---|---|
//! | [`ToneSink`] | `pedal-audio` (cpal mixer) |
//! | [`AxisSource`] | `pedal-input` (gamepad / replay reader thread) |
//! | [`CommandRunner`] | `pedal-runtime` (tokio processes) |
//! | [`SystemProbePort`] | `pedal-runtime` (command probing) |

mod command_runner;
mod system_probe;

use crate::domain::{AlertHandler, DeviceInfo, HandlerId};
use crate::error::CoreError;

pub use command_runner::{CommandOutput, CommandRunner, CommandStatus};
pub use system_probe::SystemProbePort;

/// Destination for alert tones.
///
/// All methods take `&self`; implementations synchronise internally.
#[cfg_attr(test, mockall::automock)]
pub trait ToneSink: Send + Sync {
    /// Start playing the handler's tone. No-op if it is already playing.
    fn start_tone(&self, handler: &AlertHandler);

    /// Stop the handler's tone. No-op if it is not playing.
    fn stop_tone(&self, id: &HandlerId);

    /// Replace the parameters of a playing tone. No-op if it is not playing.
    fn update_tone(&self, handler: &AlertHandler);
}

/// Source of normalised axis values from an input device.
pub trait AxisSource: Send + Sync {
    /// Enumerate connected devices. Stops any running read loop.
    fn list_devices(&self) -> Result<Vec<DeviceInfo>, CoreError>;

    /// Open a device and start reading. Returns the number of axes, which is
    /// `0` when the device could not be opened.
    fn select_device(&self, index: usize) -> Result<usize, CoreError>;

    /// Stop reading and forget the current device.
    fn clear_device(&self);

    /// Latest axis snapshot, each value in `[0.0, 1.0]`.
    fn axis_values(&self) -> Vec<f32>;
}
