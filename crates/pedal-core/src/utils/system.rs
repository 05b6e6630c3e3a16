//! System dependency types.

/// Represents the status of a system dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    /// Dependency is installed and available.
    Present { version: String },
    /// Dependency is missing.
    Missing,
    /// Dependency is optional and was not found.
    Optional,
}

/// Information about a system dependency.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Name of the dependency (e.g., "python", "pip").
    pub name: String,
    pub status: DependencyStatus,
    /// What this dependency is used for.
    pub description: String,
    pub required: bool,
    /// Installation instructions or hints.
    pub install_hint: Option<String>,
}

impl Dependency {
    /// Create a new required dependency (initially missing).
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: DependencyStatus::Missing,
            description: description.into(),
            required: true,
            install_hint: None,
        }
    }

    /// Create a new optional dependency.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: DependencyStatus::Optional,
            description: description.into(),
            required: false,
            install_hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.install_hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: DependencyStatus) -> Self {
        self.status = status;
        self
    }

    /// Set status from a probe result: `Some(version)` is present, `None` is
    /// missing (required) or optional.
    #[must_use]
    pub fn with_version(self, version: Option<String>) -> Self {
        let status = match version {
            Some(version) => DependencyStatus::Present { version },
            None if self.required => DependencyStatus::Missing,
            None => DependencyStatus::Optional,
        };
        self.with_status(status)
    }

    pub const fn is_missing_required(&self) -> bool {
        self.required && matches!(self.status, DependencyStatus::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_version() {
        let present = Dependency::required("pip", "installer").with_version(Some("24.0".into()));
        assert_eq!(
            present.status,
            DependencyStatus::Present {
                version: "24.0".to_string()
            }
        );

        let missing = Dependency::required("pip", "installer").with_version(None);
        assert!(missing.is_missing_required());

        let optional = Dependency::optional("alsa", "audio").with_version(None);
        assert_eq!(optional.status, DependencyStatus::Optional);
        assert!(!optional.is_missing_required());
    }
}
