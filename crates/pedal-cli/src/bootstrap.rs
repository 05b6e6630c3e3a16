//! CLI bootstrap: the composition root for stored state.
//!
//! Resolves the data root (honouring `--data-dir`), loads the `.env` file kept
//! there and reads the profile. Audio, input and process adapters are built
//! by the handlers that need them, so commands like `paths` never open a
//! device.

use std::path::{Path, PathBuf};

use pedal_core::paths::{ResolvedPaths, normalize_user_path};
use pedal_core::{Profile, ProfileStore, Settings};

use crate::error::CliError;

/// Stored state available to every command handler.
pub struct CliContext {
    pub paths: ResolvedPaths,
    pub store: ProfileStore,
    pub profile: Profile,
}

impl CliContext {
    pub const fn settings(&self) -> &Settings {
        &self.profile.settings
    }

    /// Persist the in-memory profile.
    pub fn save(&self) -> Result<(), CliError> {
        Ok(self.store.save(&self.profile)?)
    }
}

/// Load `.env` from the working directory, then from the data root.
///
/// Variables that are already set are never overridden. Returns the files
/// that were loaded; the first call runs before logging is set up, so callers
/// report them.
pub fn load_env_files(data_root_env: Option<&Path>) -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(path) = data_root_env.filter(|p| p.is_file()) {
        match dotenvy::from_path(path) {
            Ok(()) => loaded.push(path.to_path_buf()),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable .env"),
        }
    }
    loaded
}

/// Debug-log the `.env` files returned by [`load_env_files`].
pub fn log_env_files(loaded: &[PathBuf]) {
    for path in loaded {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }
}

/// Resolve every data path, with an optional explicit data root.
pub fn resolve_paths(data_dir: Option<&str>) -> Result<ResolvedPaths, CliError> {
    match data_dir.filter(|d| !d.trim().is_empty()) {
        Some(dir) => {
            let root = normalize_user_path(dir).map_err(|e| CliError::Config(e.to_string()))?;
            Ok(ResolvedPaths::under(root))
        }
        None => ResolvedPaths::resolve().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Build the context: resolve paths, load the data-root `.env` and the profile.
pub fn bootstrap(data_dir: Option<&str>) -> Result<CliContext, CliError> {
    let paths = resolve_paths(data_dir)?;
    log_env_files(&load_env_files(Some(&paths.env_file)));

    let store = ProfileStore::new(&paths.profile);
    let profile = store.load()?;
    tracing::debug!(
        profile = %store.path().display(),
        handlers = profile.handler_count(),
        "Profile loaded"
    );

    Ok(CliContext {
        paths,
        store,
        profile,
    })
}
