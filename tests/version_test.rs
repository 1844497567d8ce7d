//! Version resolution against real metadata files

use std::fs;

use tempfile::TempDir;

use observability_test_app::config::ProjectSection;
use observability_test_app::settings::Settings;
use observability_test_app::version::{VersionResolver, UNKNOWN_VERSION};

// Each test uses its own variable name so parallel tests never race on the
// process environment.

#[test]
fn resolves_version_from_project_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pyproject.toml");
    fs::write(&path, "[project]\nversion = \"1.2.3\"\n").unwrap();

    let resolver = VersionResolver::new(&path).with_env_var("OTA_TEST_VERSION_FROM_FILE");
    assert_eq!(resolver.resolve(), "1.2.3");
}

#[test]
fn resolver_prefers_file_over_environment() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pyproject.toml");
    fs::write(
        &path,
        "[build-system]\nrequires = [\"hatchling\"]\n\n[project]\nname = \"observability-test-app\"\nversion = \"0.5.0\"\n\n[tool.ruff]\nline-length = 88\n",
    )
    .unwrap();

    std::env::set_var("OTA_TEST_VERSION_SHADOWED", "9.9.9");
    let resolver = VersionResolver::new(&path).with_env_var("OTA_TEST_VERSION_SHADOWED");
    assert_eq!(resolver.resolve(), "0.5.0");
}

#[test]
fn missing_file_without_env_is_unknown() {
    let temp_dir = TempDir::new().unwrap();
    let resolver = VersionResolver::new(temp_dir.path().join("pyproject.toml"))
        .with_env_var("OTA_TEST_VERSION_NEVER_SET");
    assert_eq!(resolver.resolve(), UNKNOWN_VERSION);
}

#[test]
fn missing_file_falls_back_to_env() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_var("OTA_TEST_VERSION_ENV_FALLBACK", "9.9.9");

    let resolver = VersionResolver::new(temp_dir.path().join("pyproject.toml"))
        .with_env_var("OTA_TEST_VERSION_ENV_FALLBACK");
    assert_eq!(resolver.resolve(), "9.9.9");
}

#[test]
fn missing_version_field_falls_back_to_env() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pyproject.toml");
    fs::write(&path, "[project]\nname = \"demo\"\n").unwrap();
    std::env::set_var("OTA_TEST_VERSION_NO_FIELD", "2.0.0-rc1");

    let resolver = VersionResolver::new(&path).with_env_var("OTA_TEST_VERSION_NO_FIELD");
    assert_eq!(resolver.resolve(), "2.0.0-rc1");
}

#[test]
fn empty_env_value_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_var("OTA_TEST_VERSION_EMPTY", "");

    let resolver = VersionResolver::new(temp_dir.path().join("pyproject.toml"))
        .with_env_var("OTA_TEST_VERSION_EMPTY");
    assert_eq!(resolver.resolve(), UNKNOWN_VERSION);
}

#[test]
fn unreadable_metadata_degrades_to_unknown() {
    // A directory cannot be read as text
    let temp_dir = TempDir::new().unwrap();
    let resolver =
        VersionResolver::new(temp_dir.path()).with_env_var("OTA_TEST_VERSION_UNREADABLE");
    assert_eq!(resolver.resolve(), UNKNOWN_VERSION);
}

#[test]
fn custom_section_is_searched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Cargo.toml");
    fs::write(&path, "[package]\nname = \"svc\"\nversion = \"0.7.0\"\n").unwrap();

    let resolver = VersionResolver::new(&path).with_env_var("OTA_TEST_VERSION_PACKAGE");
    assert_eq!(resolver.resolve(), UNKNOWN_VERSION);

    let resolver = resolver.with_section("package");
    assert_eq!(resolver.resolve(), "0.7.0");
}

#[test]
fn settings_from_project_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Cargo.toml");
    fs::write(&path, "[package]\nname = \"svc\"\nversion = \"0.3.1\"\n").unwrap();

    let project = ProjectSection {
        metadata_path: path,
        section: "package".to_string(),
        version_env: "OTA_TEST_VERSION_SETTINGS".to_string(),
    };

    let settings = Settings::from_project(&project);
    assert_eq!(settings.version(), "0.3.1");
}

#[test]
fn settings_environment_overrides_metadata_version() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pyproject.toml");
    fs::write(&path, "[project]\nversion = \"0.5.0\"\n").unwrap();
    std::env::set_var("OTA_TEST_VERSION_OVERRIDE", "9.9.9");

    let project = ProjectSection {
        metadata_path: path,
        section: "project".to_string(),
        version_env: "OTA_TEST_VERSION_OVERRIDE".to_string(),
    };

    assert_eq!(Settings::from_project(&project).version(), "9.9.9");
    assert_eq!(VersionResolver::from_config(&project).resolve(), "0.5.0");
}

#[test]
fn settings_ignore_empty_override() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pyproject.toml");
    fs::write(&path, "[project]\nversion = \"0.5.0\"\n").unwrap();
    std::env::set_var("OTA_TEST_VERSION_BLANK_OVERRIDE", " ");

    let project = ProjectSection {
        metadata_path: path,
        section: "project".to_string(),
        version_env: "OTA_TEST_VERSION_BLANK_OVERRIDE".to_string(),
    };

    assert_eq!(Settings::from_project(&project).version(), "0.5.0");
}
