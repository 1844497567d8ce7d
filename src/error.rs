//! Error types for observability-test-app

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("metadata file not found at {}", .0.display())]
    MetadataNotFound(PathBuf),

    #[error("version not found in [{0}] section")]
    VersionNotFound(String),

    #[error("invalid alert payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("invalid alert payload: expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Expected conditions on a fresh checkout or inside a container image.
    pub fn is_missing_metadata(&self) -> bool {
        matches!(self, Error::MetadataNotFound(_) | Error::VersionNotFound(_))
    }
}
