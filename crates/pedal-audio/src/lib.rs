#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod audio_thread;
pub mod error;
pub mod output;
pub mod synth;

// Re-export key types for convenience
pub use audio_thread::{AudioConfig, AudioThreadHandle, OutputStatus};
pub use error::AudioError;
pub use output::{OutputDeviceInfo, list_output_devices};
pub use synth::{MixerToneSink, SharedMixer, ToneMixer};
