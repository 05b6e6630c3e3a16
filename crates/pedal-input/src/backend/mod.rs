//! Platform backends behind the reader thread.
//!
//! A backend is created on the reader thread and never leaves it, so it does
//! not need to be `Send`.

mod gamepad;
mod null;
mod replay;

use pedal_core::DeviceInfo;

pub use gamepad::GilrsBackend;
pub use null::NullBackend;
pub use replay::{DEFAULT_FRAME_INTERVAL, ReplayBackend, ReplayFrame};

/// Source of raw axis values in `[-1, 1]`.
pub trait InputBackend {
    /// Enumerate connected devices.
    fn devices(&mut self) -> Vec<DeviceInfo>;

    /// Open a device, returning its axis count, or `None` when it cannot be opened.
    fn open(&mut self, index: usize) -> Option<usize>;

    /// Process pending events and write the current raw axis values into `raw`.
    fn poll(&mut self, raw: &mut Vec<f32>);

    /// Forget the open device.
    fn close(&mut self);
}
