//! # Storage Layer
//!
//! Persistence layer for tick workspaces.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | JSON array | `.tick/tasks.json` |
//! | Projects | JSON array | `.tick/projects.json` |
//! | Config | TOML | `.tick/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`FileStorage`] uses file locking (`fs2`) for concurrent access
//! - All writes are atomic (temp file + rename)
//!
//! ## Workspace Structure
//!
//! ```text
//! .tick/
//! ├── tasks.json            # Task collection
//! ├── projects.json         # Project collection
//! └── config.toml           # Workspace configuration
//! ```
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point for locating and initializing a workspace
//! - [`StorageAdapter`] - Keyed blob storage the store writes through
//! - [`FileStorage`] / [`MemoryStorage`] - Adapter implementations
//! - [`WorkspaceConfig`] / [`GlobalConfig`] - TOML configuration

mod adapter;
mod file;
mod config;
mod workspace;

pub use adapter::{MemoryStorage, StorageAdapter, StorageError};
pub use file::FileStorage;
pub use config::{ConfigError, GlobalConfig, WorkspaceConfig};
pub use workspace::{Workspace, WorkspaceError, DATA_DIR};
