//! Configuration handling for ticklist
//!
//! Configuration is stored in `config.toml` under the platform config
//! directory (e.g. `~/.config/ticklist/config.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the todo.txt file
    pub todo_file: Option<PathBuf>,

    /// Record every change in the event journal
    pub journal: bool,

    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo_file: None,
            journal: true,
            default_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Resolves the todo file path
    ///
    /// An explicit path (flag or `TICK_FILE`) wins over the configured one,
    /// which wins over `todo.txt` in the platform data directory.
    pub fn resolve_todo_file(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        if let Some(path) = &self.todo_file {
            return path.clone();
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join("todo.txt"))
            .unwrap_or_else(|| PathBuf::from("todo.txt"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "ticklist", "ticklist")
}
