use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use observability_test_app::config::{AppConfig, LogFormat, DEFAULT_VERSION_ENV};

#[test]
fn defaults_apply_without_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::load_from(temp_dir.path().join("missing.toml"))
        .expect("missing config file should fall back to defaults");

    assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.project.metadata_path, PathBuf::from("pyproject.toml"));
    assert_eq!(config.project.section, "project");
    assert_eq!(config.project.version_env, DEFAULT_VERSION_ENV);
}

#[test]
fn file_values_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[server]
host = "127.0.0.1"
port = 9100

[logging]
level = "debug"
format = "text"

[project]
metadata_path = "/srv/app/pyproject.toml"
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).expect("config should parse");
    assert_eq!(config.server.bind_address(), "127.0.0.1:9100");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(
        config.project.metadata_path,
        PathBuf::from("/srv/app/pyproject.toml")
    );
    assert_eq!(config.project.section, "project");
}

#[test]
fn blank_log_level_is_normalized() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[logging]\nlevel = \"  \"\n").unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.logging.level, "info");
}

#[test]
fn invalid_log_format_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();

    assert!(
        AppConfig::load_from(&path).is_err(),
        "Expected unknown log format to fail validation"
    );
}
