//! Configuration loading and root folder resolution
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `MC_ROOT_FOLDER` environment variable
//! 3. `root_folder` key in the TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing config file is normal. A malformed one is reported to the caller,
//! who logs it and carries on with defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "MC_ROOT_FOLDER";

/// Environment variable pointing at an explicit config file
pub const CONFIG_FILE_ENV: &str = "MC_CONFIG";

/// Database file name inside the root folder
pub const DATABASE_FILENAME: &str = "music_controller.db";

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
}

/// Values supplied on the command line (clap also folds in env vars for these)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub port: u16,
    pub bind: String,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge command-line overrides, environment and TOML config into a final config
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Self {
        Self {
            root_folder: resolve_root_folder(cli.root_folder.as_deref(), toml),
            port: cli.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            bind: cli
                .bind
                .clone()
                .or_else(|| toml.bind.clone())
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            log_level: toml
                .log_level
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILENAME)
    }
}

/// Resolve the root folder following the priority order in the module docs
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// Locate the config file: `MC_CONFIG` first, then the per-user config directory
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("music-controller").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load the TOML config file, if there is one
///
/// Returns `Ok(None)` when no config file exists.
pub fn load_toml_config() -> Result<Option<TomlConfig>> {
    match config_file_path() {
        Some(path) => load_toml_file(&path).map(Some),
        None => Ok(None),
    }
}

/// Parse a specific TOML config file
pub fn load_toml_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("music-controller"))
        .unwrap_or_else(|| PathBuf::from("./mc_data"))
}
