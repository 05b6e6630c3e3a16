//! Domain types for axis monitoring.

mod axis;
mod device;
mod handler;
mod status;

pub use axis::{AXIS_NAMES, AxisMonitor, axis_name};
pub use device::{DeviceInfo, parse_device_selection};
pub use handler::{
    AlertHandler, DEFAULT_FREQUENCY, DEFAULT_VOLUME, HandlerId, HandlerUpdate, HandlerValueError,
    MAX_FREQUENCY, MIN_FREQUENCY, Waveform, parse_frequency, parse_percent,
};
pub use status::MonitorStatus;
