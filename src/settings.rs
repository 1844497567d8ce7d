//! Process-wide settings, built once at startup

use std::env;

use crate::config::ProjectSection;
use crate::version::VersionResolver;

/// Immutable runtime settings shared with every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    version: String,
}

impl Settings {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Freeze the version described by `project`.
    ///
    /// A non-empty `project.version_env` variable overrides the metadata file;
    /// otherwise the resolver supplies the value.
    pub fn from_project(project: &ProjectSection) -> Self {
        let overridden = env::var(&project.version_env)
            .ok()
            .filter(|v| !v.trim().is_empty());

        match overridden {
            Some(version) => {
                tracing::debug!(var = %project.version_env, "Version taken from environment");
                Self::new(version)
            }
            None => Self::new(VersionResolver::from_config(project).resolve()),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}
