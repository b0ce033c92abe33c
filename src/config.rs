//! Application configuration persistence
//!
//! Settings live in a small JSON file under the user configuration
//! directory. A missing file yields the defaults; a file that fails to read
//! or parse is reported on stderr and also yields the defaults, so a damaged
//! configuration never prevents startup.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Persisted application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory the daily CSV record files are written to; the current
    /// working directory when unset
    pub data_dir: Option<PathBuf>,
    /// Pre-filled hint for the Technician field
    #[serde(default)]
    pub default_technician: String,
}

/// Path of the configuration file, `<config_dir>/agrilog/config.json`
pub fn config_file_path() -> ConfigResult<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("agrilog").join("config.json"))
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Load the configuration, falling back to defaults on any problem
pub fn load() -> AppConfig {
    match try_load() {
        Ok(config) => config,
        Err(ConfigError::NoConfigDirectory) => AppConfig::default(),
        Err(err) => {
            eprintln!("Warning: {err}; using default configuration");
            AppConfig::default()
        }
    }
}

fn try_load() -> ConfigResult<AppConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFile {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}

/// Persist the configuration, creating the directory as needed
pub fn save(config: &AppConfig) -> ConfigResult<()> {
    let path = config_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            error: e.to_string(),
        })?;
    }
    let contents = serde_json::to_string_pretty(config).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    fs::write(&path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}

impl AppConfig {
    /// Directory the record files go to: the configured override, or the
    /// current working directory
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
