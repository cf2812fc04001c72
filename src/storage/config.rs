//! Configuration handling
//!
//! Workspace settings live in `.tick/config.toml`. User-wide settings
//! live in the platform config directory, for example
//! `~/.config/tick/config.toml` on Linux.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Priority, DEFAULT_PROJECT_NAME};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Per-workspace configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Project preselected when `tick add` is run without `--project`
    pub default_project: String,

    /// Priority applied when `tick add` is run without `--priority`
    pub default_priority: Priority,

    /// Filter shown when `tick list` is run without an argument
    pub default_filter: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_project: DEFAULT_PROJECT_NAME.to_string(),
            default_priority: Priority::Low,
            default_filter: "all".to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Loads workspace configuration, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workspace config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse workspace config")
    }
}

/// User-wide configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (`text` or `json`)
    pub default_format: Option<String>,
}

impl GlobalConfig {
    /// Returns the user-wide config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "ticklist", "tick").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads user-wide configuration, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_dir = match Self::config_dir() {
            Some(dir) => dir,
            None => return Ok(Self::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read global config: {}", config_path.display())
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }
}
