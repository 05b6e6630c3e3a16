//! Alert handler domain type.
//!
//! A handler watches one axis and plays a tone while the axis value sits
//! inside its `[min_threshold, max_threshold]` range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lowest selectable tone frequency in Hz.
pub const MIN_FREQUENCY: u32 = 100;

/// Highest selectable tone frequency in Hz.
pub const MAX_FREQUENCY: u32 = 2000;

/// Frequency assigned to new handlers.
pub const DEFAULT_FREQUENCY: u32 = 440;

/// Volume assigned to new handlers.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Short random identifier of a handler (8 hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(String);

impl HandlerId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(8);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape of the generated tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Sawtooth,
    Square,
}

impl Waveform {
    pub const ALL: [Self; 3] = [Self::Sine, Self::Sawtooth, Self::Square];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Sawtooth => "sawtooth",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing handler values from user text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerValueError {
    #[error("unknown waveform '{0}' (expected sine, sawtooth or square)")]
    UnknownWaveform(String),

    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),
}

impl FromStr for Waveform {
    type Err = HandlerValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HandlerValueError::UnknownWaveform(wanted.to_string()))
    }
}

/// Configuration and runtime state of a single alert handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertHandler {
    pub id: HandlerId,
    pub min_threshold: f32,
    pub max_threshold: f32,
    pub frequency: u32,
    pub volume: f32,
    pub waveform: Waveform,

    /// Whether the last observed axis value was inside the range.
    #[serde(skip)]
    pub triggered: bool,
}

impl Default for AlertHandler {
    fn default() -> Self {
        Self {
            id: HandlerId::generate(),
            min_threshold: 1.0,
            max_threshold: 1.0,
            frequency: DEFAULT_FREQUENCY,
            volume: DEFAULT_VOLUME,
            waveform: Waveform::Sine,
            triggered: false,
        }
    }
}

impl AlertHandler {
    /// Whether `value` lies inside the threshold range (inclusive).
    pub fn check_trigger(&self, value: f32) -> bool {
        self.min_threshold <= value && value <= self.max_threshold
    }

    /// Set the lower bound, dragging the upper bound up if needed.
    pub fn set_min_threshold(&mut self, value: f32) {
        let value = clamp_unit(value);
        self.min_threshold = value;
        if value > self.max_threshold {
            self.max_threshold = value;
        }
    }

    /// Set the upper bound, dragging the lower bound down if needed.
    pub fn set_max_threshold(&mut self, value: f32) {
        let value = clamp_unit(value);
        self.max_threshold = value;
        if value < self.min_threshold {
            self.min_threshold = value;
        }
    }

    pub fn set_frequency(&mut self, hz: u32) {
        self.frequency = hz.clamp(MIN_FREQUENCY, MAX_FREQUENCY);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_unit(volume);
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Re-apply every setter so values loaded from disk respect the ranges.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let (min, max) = (self.min_threshold, self.max_threshold);
        self.min_threshold = clamp_unit(min);
        self.max_threshold = clamp_unit(max);
        if self.min_threshold > self.max_threshold {
            self.max_threshold = self.min_threshold;
        }
        self.set_frequency(self.frequency);
        self.set_volume(self.volume);
        self.triggered = false;
        self
    }

    /// Apply a partial edit. Fields are applied in declaration order, so a
    /// combined min/max edit behaves like setting min first, then max.
    pub fn apply(&mut self, update: &HandlerUpdate) {
        if let Some(min) = update.min_threshold {
            self.set_min_threshold(min);
        }
        if let Some(max) = update.max_threshold {
            self.set_max_threshold(max);
        }
        if let Some(hz) = update.frequency {
            self.set_frequency(hz);
        }
        if let Some(volume) = update.volume {
            self.set_volume(volume);
        }
        if let Some(waveform) = update.waveform {
            self.set_waveform(waveform);
        }
    }

    /// Threshold as a whole percentage, the way it is shown to users.
    pub fn min_percent(&self) -> u8 {
        to_percent(self.min_threshold)
    }

    pub fn max_percent(&self) -> u8 {
        to_percent(self.max_threshold)
    }

    pub fn volume_percent(&self) -> u8 {
        to_percent(self.volume)
    }
}

/// Partial handler edit. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerUpdate {
    pub min_threshold: Option<f32>,
    pub max_threshold: Option<f32>,
    pub frequency: Option<u32>,
    pub volume: Option<f32>,
    pub waveform: Option<Waveform>,
}

impl HandlerUpdate {
    pub fn is_empty(&self) -> bool {
        self.min_threshold.is_none()
            && self.max_threshold.is_none()
            && self.frequency.is_none()
            && self.volume.is_none()
            && self.waveform.is_none()
    }
}

/// Parse a percentage entry ("0".."100", clamped) into a unit fraction.
pub fn parse_percent(text: &str) -> Result<f32, HandlerValueError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| HandlerValueError::NotAnInteger(text.trim().to_string()))?;
    Ok(value.clamp(0, 100) as f32 / 100.0)
}

/// Parse a frequency entry in Hz, clamped to the supported range.
pub fn parse_frequency(text: &str) -> Result<u32, HandlerValueError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| HandlerValueError::NotAnInteger(text.trim().to_string()))?;
    Ok(value.clamp(i64::from(MIN_FREQUENCY), i64::from(MAX_FREQUENCY)) as u32)
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn to_percent(value: f32) -> u8 {
    // Truncates like the integer entry fields do.
    (clamp_unit(value) * 100.0) as u8
}
