use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "OBSERVABILITY_TEST_APP_CONFIG";

const ENV_PREFIX: &str = "OBSERVABILITY_TEST_APP";

/// Environment variable consulted when the metadata file yields no version.
pub const DEFAULT_VERSION_ENV: &str = "OBSERVABILITY_TEST_APP_VERSION";

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingSection,
    pub project: ProjectSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(config_path)
    }

    /// Load configuration from the given file (skipped when absent), then
    /// apply `OBSERVABILITY_TEST_APP_*` overrides.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `OBSERVABILITY_TEST_APP_SERVER__PORT=9000`. The single-underscore
    /// `OBSERVABILITY_TEST_APP_VERSION` therefore never collides with a
    /// configuration key.
    pub fn load_from(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let mut builder = config::Config::builder();

        if config_path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

/// Where the service version comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Project-metadata file holding the version.
    pub metadata_path: PathBuf,
    /// Table header the version field lives under.
    pub section: String,
    /// Fallback environment variable.
    pub version_env: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            metadata_path: PathBuf::from("pyproject.toml"),
            section: "project".to_string(),
            version_env: DEFAULT_VERSION_ENV.to_string(),
        }
    }
}
