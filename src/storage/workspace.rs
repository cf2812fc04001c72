//! Workspace discovery and initialization
//!
//! A workspace is any directory containing `.tick/`. Commands walk up
//! from the current directory to find it, so they work from anywhere
//! inside the tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::WorkspaceConfig;
use super::file::FileStorage;

/// Directory that marks a workspace root and holds its data
pub const DATA_DIR: &str = ".tick";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a tick workspace. Run 'tick init' first.")]
    NotInWorkspace,
}

/// A tick workspace
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    config: WorkspaceConfig,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let data_dir = root.join(DATA_DIR);

        if !data_dir.is_dir() {
            return Err(WorkspaceError::NotInWorkspace.into());
        }

        let config = WorkspaceConfig::load(&data_dir.join("config.toml"))?;

        Ok(Self { root, config })
    }

    /// Opens the workspace containing the current directory
    pub fn open_current() -> Result<Self> {
        let root = Self::find_root().ok_or(WorkspaceError::NotInWorkspace)?;
        Self::open(root)
    }

    /// Initializes a workspace at the given path
    ///
    /// Re-running on an existing workspace keeps its data and config.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let data_dir = root.join(DATA_DIR);

        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        let config_path = data_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# tick configuration

# Project preselected when 'tick add' is run without --project
default_project = "uncategorised"

# Priority applied when 'tick add' is run without --priority
default_priority = "low"

# Filter shown when 'tick list' is run without an argument
default_filter = "all"
"#;
            fs::write(&config_path, default_config).with_context(|| {
                format!("Failed to write config: {}", config_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Walks up from the current directory looking for a workspace root
    pub fn find_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(DATA_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// Returns the workspace configuration
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Returns file storage rooted at the data directory
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_dir())
    }
}
