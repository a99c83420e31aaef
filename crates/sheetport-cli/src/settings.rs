//! CLI settings
//!
//! Read from `<config dir>/sheetport/settings.toml`. Every key is optional; a
//! missing file means all defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "sheetport";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite database holding the table documents
    pub database_path: PathBuf,
    /// Directory exports are written to
    pub download_dir: PathBuf,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: data_dir().join("tables.db"),
            download_dir: PathBuf::from("."),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` overrides it
    pub filter: String,
    /// Also write JSON logs to `log_dir`
    pub json_logs: bool,
    pub log_dir: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json_logs: false,
            log_dir: data_dir().join("logs"),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// A file that does not exist yields the defaults; a file that exists but
    /// does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match settings_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse settings in {:?}", path))
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR).join("settings.toml"))
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
