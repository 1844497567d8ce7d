//! Service version resolution
//!
//! The version is read from a project-metadata file (`pyproject.toml` style),
//! then from an environment variable, and finally defaults to `"unknown"`.
//! Resolution never fails: every error is logged and degrades to the next tier.

use std::env;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::{ProjectSection, DEFAULT_VERSION_ENV};
use crate::{Error, Result};

/// Version reported when neither the metadata file nor the environment has one.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Resolves the service version from a metadata file with environment fallback.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    metadata_path: PathBuf,
    section: String,
    version_env: String,
}

impl VersionResolver {
    /// Resolver reading the `[project]` section of `metadata_path`.
    pub fn new(metadata_path: impl Into<PathBuf>) -> Self {
        Self {
            metadata_path: metadata_path.into(),
            section: "project".to_string(),
            version_env: DEFAULT_VERSION_ENV.to_string(),
        }
    }

    pub fn from_config(project: &ProjectSection) -> Self {
        Self {
            metadata_path: project.metadata_path.clone(),
            section: project.section.clone(),
            version_env: project.version_env.clone(),
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.version_env = name.into();
        self
    }

    /// Resolve the version. Always returns a non-empty string.
    pub fn resolve(&self) -> String {
        match read_version(&self.metadata_path, &self.section) {
            Ok(version) => return version,
            Err(err) if err.is_missing_metadata() => {
                tracing::warn!(
                    path = %self.metadata_path.display(),
                    error = %err,
                    "Falling back from metadata file version"
                );
            }
            Err(err) => {
                tracing::error!(
                    path = %self.metadata_path.display(),
                    error = %err,
                    "Error reading version from metadata file"
                );
            }
        }

        self.fallback()
    }

    fn fallback(&self) -> String {
        env::var(&self.version_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }
}

/// Read the metadata file and extract the version from `[section]`.
pub fn read_version(path: &Path, section: &str) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => Error::MetadataNotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })?;

    extract_version(&content, section)?.ok_or_else(|| Error::VersionNotFound(section.to_string()))
}

/// Find `version = "X"` inside the `[section]` table of `content`.
///
/// The table body runs from its header to the next line opening a table, or
/// to the end of input.
pub fn extract_version(content: &str, section: &str) -> Result<Option<String>> {
    let section_re = Regex::new(&format!(
        r"(?s)\[{}\](.*?)(?:\n\[|\z)",
        regex::escape(section)
    ))?;
    let Some(body) = section_re.captures(content).and_then(|c| c.get(1)) else {
        return Ok(None);
    };

    let version_re = Regex::new(r#"(?m)^\s*version\s*=\s*"([^"]+)""#)?;
    Ok(version_re
        .captures(body.as_str())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string()))
}
