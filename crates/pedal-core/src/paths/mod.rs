//! Path resolution for pedal-assistant data files.

mod error;
mod platform;
#[cfg(test)]
pub(crate) mod test_utils;

use std::fmt;
use std::path::PathBuf;

pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, ensure_directory, normalize_user_path};

/// File name of the persisted profile inside the data root.
pub const PROFILE_FILE_NAME: &str = "profile.json";

/// Every path pedal-assistant uses, resolved once for display.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub data_root: PathBuf,
    pub profile: PathBuf,
    pub env_file: PathBuf,
}

impl ResolvedPaths {
    pub fn resolve() -> Result<Self, PathError> {
        Ok(Self::under(data_root()?))
    }

    /// Paths below an explicit data root (the `--data-dir` override).
    pub fn under(data_root: PathBuf) -> Self {
        Self {
            profile: data_root.join(PROFILE_FILE_NAME),
            env_file: data_root.join(".env"),
            data_root,
        }
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data_root = {}", self.data_root.display())?;
        writeln!(f, "profile = {}", self.profile.display())?;
        write!(f, "env_file = {}", self.env_file.display())
    }
}
