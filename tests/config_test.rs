//! Integration tests for Settings loading from a local `apk2aar.toml`.
//!
//! Note: These tests run against temp directories only; a global config or
//! `APK2AAR_*` variables in the test environment take part in the merge.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use apk2aar::application::ApplicationError;
use apk2aar::config::{Settings, SettingsOverrides, LOCAL_CONFIG_FILE};

#[test]
fn given_local_config_when_load_then_overrides_given_fields_only() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let local = r#"
template_dir = "/opt/apk2aar/templates"

[gradle]
version = "8.2"
"#;
    fs::write(dir.path().join(LOCAL_CONFIG_FILE), local).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(
        settings.template_dir,
        Some(PathBuf::from("/opt/apk2aar/templates"))
    );
    assert_eq!(settings.gradle.version, "8.2");
}

#[test]
fn given_no_local_config_when_load_then_succeeds() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path()));

    assert!(settings.is_ok());
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(LOCAL_CONFIG_FILE), "[gradle\nversion = ").unwrap();

    // Act
    let result = Settings::load(Some(dir.path()));

    // Assert
    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains(LOCAL_CONFIG_FILE), "{message}")
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn given_generated_template_when_used_as_local_config_then_loads() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(LOCAL_CONFIG_FILE), Settings::template()).unwrap();

    assert!(Settings::load(Some(dir.path())).is_ok());
}

#[test]
fn given_tilde_in_local_config_when_load_then_expands_home() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let local = r#"
[decompiler]
jar = "~/tools/apktool.jar"
"#;
    fs::write(dir.path().join(LOCAL_CONFIG_FILE), local).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    let jar = settings.decompiler.jar.to_string_lossy().into_owned();
    assert!(!jar.starts_with('~'), "{jar}");
    assert!(jar.ends_with("tools/apktool.jar"), "{jar}");
}

#[test]
fn given_cli_overrides_when_applied_then_win_over_loaded_values() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(LOCAL_CONFIG_FILE),
        "work_dir = \"/from/file\"\n[gradle]\nversion = \"8.2\"\n",
    )
    .unwrap();
    let overrides = SettingsOverrides {
        work_dir: Some(PathBuf::from("/from/cli")),
        gradle_version: Some("7.6".to_string()),
        ..SettingsOverrides::default()
    };

    // Act
    let settings = Settings::load(Some(dir.path()))
        .expect("load settings")
        .with_overrides(&overrides);

    // Assert
    assert_eq!(settings.work_dir, PathBuf::from("/from/cli"));
    assert_eq!(settings.gradle.version, "7.6");
}

#[test]
fn given_settings_when_shown_as_toml_then_round_trips() {
    let settings = Settings::default();

    let shown = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&shown).unwrap();

    assert_eq!(parsed, settings);
}

#[test]
fn given_no_template_dir_anywhere_when_load_then_bundled_template_is_selected() {
    // Arrange: a working directory with neither apk2aar.toml nor templates/
    let dir = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.template_dir, None);
}
