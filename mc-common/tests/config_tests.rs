//! Tests for configuration loading and root folder resolution
//!
//! Tests touching MC_ROOT_FOLDER / MC_CONFIG are #[serial] so they do not
//! race each other on process environment.

use mc_common::config::{
    default_root_folder, load_toml_config, load_toml_file, resolve_root_folder, TomlConfig,
    CONFIG_FILE_ENV, ROOT_FOLDER_ENV,
};
use mc_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root = resolve_root_folder(None, &TomlConfig::default());
    assert_eq!(root, default_root_folder());
    assert!(!root.as_os_str().is_empty());
}

#[test]
#[serial]
fn test_resolver_env_var() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/mc-test-env-folder");

    let root = resolve_root_folder(None, &TomlConfig::default());
    assert_eq!(root, PathBuf::from("/tmp/mc-test-env-folder"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_cli_beats_env() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/mc-test-env-folder");

    let root = resolve_root_folder(Some(Path::new("/tmp/mc-cli")), &TomlConfig::default());
    assert_eq!(root, PathBuf::from("/tmp/mc-cli"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_env_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/mc-test-env-folder");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/mc-toml")),
        ..Default::default()
    };

    assert_eq!(
        resolve_root_folder(None, &toml),
        PathBuf::from("/tmp/mc-test-env-folder")
    );

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(resolve_root_folder(None, &toml), PathBuf::from("/tmp/mc-toml"));
}

#[test]
#[serial]
fn test_load_toml_from_config_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "root_folder = \"/srv/music\"\nport = 8123\nlog_level = \"debug\"\n",
    )
    .unwrap();

    env::set_var(CONFIG_FILE_ENV, &path);
    let config = load_toml_config().unwrap().expect("config file should load");
    env::remove_var(CONFIG_FILE_ENV);

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/music")));
    assert_eq!(config.port, Some(8123));
    assert_eq!(config.log_level.as_deref(), Some("debug"));
    assert!(config.bind.is_none());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"\n").unwrap();

    let err = load_toml_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_missing_toml_file_is_config_error() {
    let err = load_toml_file(Path::new("/nonexistent/mc/config.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
