//! Settings domain types and validation.
//!
//! Pure domain types with no infrastructure dependencies. Persistence lives
//! in [`crate::profile`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default monitor refresh interval (~30 updates per second).
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 33;

/// Default interval between checks for a changed audio output device.
pub const DEFAULT_DEVICE_CHECK_INTERVAL_MS: u64 = 1000;

/// Default audio block size in frames.
pub const DEFAULT_BLOCK_SIZE: u32 = 512;

/// Requirements manifest used by the launcher when none is configured.
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Python entry-point started by the launcher when none is configured.
pub const DEFAULT_ENTRY_SCRIPT: &str = "pedal_assistant.py";

/// Interpreter names tried in order when locating Python.
#[cfg(target_os = "windows")]
pub const DEFAULT_PYTHON_CANDIDATES: &[&str] = &["python", "py"];

#[cfg(not(target_os = "windows"))]
pub const DEFAULT_PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// When the launcher waits for Enter before exiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PauseMode {
    Never,
    #[default]
    OnError,
    Always,
}

impl PauseMode {
    pub const fn should_pause(self, failed: bool) -> bool {
        match self {
            Self::Never => false,
            Self::OnError => failed,
            Self::Always => true,
        }
    }
}

impl fmt::Display for PauseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Never => "never",
            Self::OnError => "on-error",
            Self::Always => "always",
        })
    }
}

impl FromStr for PauseMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "on-error" | "on_error" | "onerror" => Ok(Self::OnError),
            "always" => Ok(Self::Always),
            other => Err(SettingsError::InvalidPauseMode(other.to_string())),
        }
    }
}

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Monitor update interval in milliseconds (5-1000).
    pub refresh_interval_ms: Option<u64>,

    /// How often the audio thread re-checks the default output device (100-60000 ms).
    pub device_check_interval_ms: Option<u64>,

    /// Requested audio block size in frames (64-8192).
    pub block_size: Option<u32>,

    /// Input device selected when `run` is given no `--device`.
    pub default_device: Option<usize>,

    /// Interpreter names tried by the launcher, in order.
    pub python_candidates: Option<Vec<String>>,

    /// Requirements manifest installed by the launcher.
    pub manifest_path: Option<String>,

    /// Python entry-point started by the launcher.
    pub entry_script: Option<String>,

    /// Whether the launcher upgrades pip before installing requirements.
    pub upgrade_installer: Option<bool>,

    /// When the launcher waits for acknowledgment before exiting.
    pub pause: Option<PauseMode>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            refresh_interval_ms: Some(DEFAULT_REFRESH_INTERVAL_MS),
            device_check_interval_ms: Some(DEFAULT_DEVICE_CHECK_INTERVAL_MS),
            block_size: Some(DEFAULT_BLOCK_SIZE),
            default_device: None,
            python_candidates: Some(
                DEFAULT_PYTHON_CANDIDATES
                    .iter()
                    .copied()
                    .map(String::from)
                    .collect(),
            ),
            manifest_path: Some(DEFAULT_MANIFEST.to_string()),
            entry_script: Some(DEFAULT_ENTRY_SCRIPT.to_string()),
            upgrade_installer: Some(true),
            pause: Some(PauseMode::OnError),
        }
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(
            self.refresh_interval_ms
                .unwrap_or(DEFAULT_REFRESH_INTERVAL_MS),
        )
    }

    #[must_use]
    pub fn device_check_interval(&self) -> Duration {
        Duration::from_millis(
            self.device_check_interval_ms
                .unwrap_or(DEFAULT_DEVICE_CHECK_INTERVAL_MS),
        )
    }

    pub fn effective_block_size(&self) -> u32 {
        self.block_size.unwrap_or(DEFAULT_BLOCK_SIZE)
    }

    pub fn effective_python_candidates(&self) -> Vec<String> {
        match &self.python_candidates {
            Some(candidates) if !candidates.is_empty() => candidates.clone(),
            _ => DEFAULT_PYTHON_CANDIDATES
                .iter()
                .copied()
                .map(String::from)
                .collect(),
        }
    }

    pub fn effective_manifest_path(&self) -> &str {
        self.manifest_path.as_deref().unwrap_or(DEFAULT_MANIFEST)
    }

    pub fn effective_entry_script(&self) -> &str {
        self.entry_script.as_deref().unwrap_or(DEFAULT_ENTRY_SCRIPT)
    }

    pub fn effective_upgrade_installer(&self) -> bool {
        self.upgrade_installer.unwrap_or(true)
    }

    pub fn effective_pause(&self) -> PauseMode {
        self.pause.unwrap_or_default()
    }

    /// Merge an update into these settings, only touching fields that are `Some`.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(value) = other.refresh_interval_ms {
            self.refresh_interval_ms = value;
        }
        if let Some(value) = other.device_check_interval_ms {
            self.device_check_interval_ms = value;
        }
        if let Some(value) = other.block_size {
            self.block_size = value;
        }
        if let Some(value) = other.default_device {
            self.default_device = value;
        }
        if let Some(ref value) = other.python_candidates {
            self.python_candidates.clone_from(value);
        }
        if let Some(ref value) = other.manifest_path {
            self.manifest_path.clone_from(value);
        }
        if let Some(ref value) = other.entry_script {
            self.entry_script.clone_from(value);
        }
        if let Some(value) = other.upgrade_installer {
            self.upgrade_installer = value;
        }
        if let Some(value) = other.pause {
            self.pause = value;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset the field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub refresh_interval_ms: Option<Option<u64>>,
    pub device_check_interval_ms: Option<Option<u64>>,
    pub block_size: Option<Option<u32>>,
    pub default_device: Option<Option<usize>>,
    pub python_candidates: Option<Option<Vec<String>>>,
    pub manifest_path: Option<Option<String>>,
    pub entry_script: Option<Option<String>>,
    pub upgrade_installer: Option<Option<bool>>,
    pub pause: Option<Option<PauseMode>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Refresh interval must be between 5 and 1000 ms, got {0}")]
    InvalidRefreshInterval(u64),

    #[error("Device check interval must be between 100 and 60000 ms, got {0}")]
    InvalidDeviceCheckInterval(u64),

    #[error("Block size must be between 64 and 8192 frames, got {0}")]
    InvalidBlockSize(u32),

    #[error("{0} cannot be empty")]
    EmptyPath(&'static str),

    #[error("At least one Python interpreter name is required")]
    NoPythonCandidates,

    #[error("Unknown pause mode '{0}' (expected never, on-error or always)")]
    InvalidPauseMode(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(ms) = settings.refresh_interval_ms {
        if !(5..=1000).contains(&ms) {
            return Err(SettingsError::InvalidRefreshInterval(ms));
        }
    }

    if let Some(ms) = settings.device_check_interval_ms {
        if !(100..=60_000).contains(&ms) {
            return Err(SettingsError::InvalidDeviceCheckInterval(ms));
        }
    }

    if let Some(frames) = settings.block_size {
        if !(64..=8192).contains(&frames) {
            return Err(SettingsError::InvalidBlockSize(frames));
        }
    }

    if let Some(candidates) = &settings.python_candidates {
        if candidates.iter().all(|c| c.trim().is_empty()) {
            return Err(SettingsError::NoPythonCandidates);
        }
    }

    if settings
        .manifest_path
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyPath("Manifest path"));
    }

    if settings
        .entry_script
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyPath("Entry script"));
    }

    Ok(())
}
