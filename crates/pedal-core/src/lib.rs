#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod paths;
pub mod ports;
pub mod profile;
pub mod services;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    AlertHandler, AxisMonitor, DeviceInfo, HandlerId, HandlerUpdate, MonitorStatus, Waveform,
    axis_name, parse_device_selection,
};
pub use error::CoreError;
pub use ports::{AxisSource, CommandOutput, CommandRunner, CommandStatus, SystemProbePort, ToneSink};
pub use profile::{Profile, ProfileError, ProfileStore};
pub use settings::{PauseMode, Settings, SettingsError, SettingsUpdate, validate_settings};

// Dev-dependencies used only by integration tests
#[cfg(test)]
use tokio as _;
