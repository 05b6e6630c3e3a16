//! Persisted profile: settings plus the handlers configured for each axis.
//!
//! Stored as pretty-printed JSON. Axis indices are object keys, so the file
//! reads like `{"settings": {...}, "axes": {"0": [...], "2": [...]}}`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{AlertHandler, HandlerId, HandlerUpdate};
use crate::paths::{PathError, ensure_directory};
use crate::settings::{Settings, SettingsError, validate_settings};

/// Errors raised while loading, saving or editing a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Profile {path} is not valid: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write profile {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("No handler '{id}' on axis {axis}")]
    HandlerNotFound { axis: usize, id: HandlerId },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Settings and handler configuration persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub settings: Settings,
    pub axes: BTreeMap<usize, Vec<AlertHandler>>,
}

impl Profile {
    /// Handlers stored for an axis (empty when none are configured).
    pub fn handlers(&self, axis: usize) -> &[AlertHandler] {
        self.axes.get(&axis).map_or(&[], Vec::as_slice)
    }

    /// Add a handler to an axis and return its id.
    pub fn add_handler(&mut self, axis: usize, handler: AlertHandler) -> HandlerId {
        let handler = handler.normalized();
        let id = handler.id.clone();
        self.axes.entry(axis).or_default().push(handler);
        id
    }

    /// Edit a stored handler.
    pub fn edit_handler(
        &mut self,
        axis: usize,
        id: &HandlerId,
        update: &HandlerUpdate,
    ) -> Result<&AlertHandler, ProfileError> {
        let handler = self
            .axes
            .get_mut(&axis)
            .and_then(|handlers| handlers.iter_mut().find(|h| &h.id == id))
            .ok_or_else(|| ProfileError::HandlerNotFound {
                axis,
                id: id.clone(),
            })?;
        handler.apply(update);
        Ok(handler)
    }

    /// Remove a stored handler. Empty axes are dropped from the map.
    pub fn remove_handler(&mut self, axis: usize, id: &HandlerId) -> Result<AlertHandler, ProfileError> {
        let not_found = || ProfileError::HandlerNotFound {
            axis,
            id: id.clone(),
        };
        let handlers = self.axes.get_mut(&axis).ok_or_else(not_found)?;
        let position = handlers.iter().position(|h| &h.id == id).ok_or_else(not_found)?;
        let removed = handlers.remove(position);
        if handlers.is_empty() {
            self.axes.remove(&axis);
        }
        Ok(removed)
    }

    /// Remove every handler of an axis, returning how many were removed.
    pub fn clear_axis(&mut self, axis: usize) -> usize {
        self.axes.remove(&axis).map_or(0, |handlers| handlers.len())
    }

    /// Total number of stored handlers.
    pub fn handler_count(&self) -> usize {
        self.axes.values().map(Vec::len).sum()
    }
}

/// Loads and saves a [`Profile`] at a fixed location.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile. A missing file yields an empty profile.
    pub fn load(&self) -> Result<Profile, ProfileError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No profile yet, using defaults");
            return Ok(Profile::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ProfileError::Read {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let mut profile: Profile =
            serde_json::from_str(&content).map_err(|e| ProfileError::Parse {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        validate_settings(&profile.settings)?;

        for handlers in profile.axes.values_mut() {
            for handler in handlers.iter_mut() {
                *handler = handler.clone().normalized();
            }
        }

        Ok(profile)
    }

    /// Validate and write the profile, creating the parent directory.
    pub fn save(&self, profile: &Profile) -> Result<(), ProfileError> {
        validate_settings(&profile.settings)?;

        if let Some(parent) = self.path.parent() {
            ensure_directory(parent)?;
        }

        let content = serde_json::to_string_pretty(profile).map_err(|e| ProfileError::Write {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        fs::write(&self.path, content).map_err(|e| ProfileError::Write {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %self.path.display(), "Profile saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Waveform;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_default() {
        let temp = tempdir().unwrap();
        let store = ProfileStore::new(temp.path().join("profile.json"));
        let profile = store.load().unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let store = ProfileStore::new(temp.path().join("nested").join("profile.json"));

        let mut profile = Profile::default();
        profile.settings.refresh_interval_ms = Some(20);
        let mut handler = AlertHandler::default();
        handler.set_min_threshold(0.3);
        handler.set_waveform(Waveform::Square);
        let id = profile.add_handler(2, handler);

        store.save(&profile).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.settings.refresh_interval_ms, Some(20));
        assert_eq!(loaded.handlers(2).len(), 1);
        assert_eq!(loaded.handlers(2)[0].id, id);
        assert_eq!(loaded.handlers(2)[0].waveform, Waveform::Square);
        assert!(loaded.handlers(0).is_empty());

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"2\""));
    }

    #[test]
    fn test_invalid_json_names_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("profile.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ProfileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
        assert!(err.to_string().contains("profile.json"));
    }

    #[test]
    fn test_invalid_settings_rejected_on_save() {
        let temp = tempdir().unwrap();
        let store = ProfileStore::new(temp.path().join("profile.json"));
        let mut profile = Profile::default();
        profile.settings.block_size = Some(1);

        assert!(matches!(
            store.save(&profile),
            Err(ProfileError::Settings(SettingsError::InvalidBlockSize(1)))
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_edit_and_remove_handler() {
        let mut profile = Profile::default();
        let id = profile.add_handler(0, AlertHandler::default());

        let update = HandlerUpdate {
            volume: Some(0.9),
            ..HandlerUpdate::default()
        };
        let edited = profile.edit_handler(0, &id, &update).unwrap();
        assert_eq!(edited.volume_percent(), 90);

        assert!(matches!(
            profile.edit_handler(1, &id, &update),
            Err(ProfileError::HandlerNotFound { axis: 1, .. })
        ));

        profile.remove_handler(0, &id).unwrap();
        assert!(profile.axes.is_empty());
        assert!(profile.remove_handler(0, &id).is_err());
    }

    #[test]
    fn test_clear_axis() {
        let mut profile = Profile::default();
        profile.add_handler(1, AlertHandler::default());
        profile.add_handler(1, AlertHandler::default());
        profile.add_handler(3, AlertHandler::default());

        assert_eq!(profile.handler_count(), 3);
        assert_eq!(profile.clear_axis(1), 2);
        assert_eq!(profile.clear_axis(1), 0);
        assert_eq!(profile.handler_count(), 1);
    }
}
