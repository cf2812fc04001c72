//! Keyed blob storage seam
//!
//! The store persists whole collections as JSON strings under fixed keys.
//! Adapters only move strings around; they never interpret the payload.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read '{key}': {source}")]
    Read { key: String, source: io::Error },

    #[error("Failed to write '{key}': {source}")]
    Write { key: String, source: io::Error },
}

impl StorageError {
    pub(crate) fn read(key: &str, source: io::Error) -> Self {
        Self::Read {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn write(key: &str, source: io::Error) -> Self {
        Self::Write {
            key: key.to_string(),
            source,
        }
    }
}

/// Keyed blob storage the store reads and writes through
pub trait StorageAdapter {
    /// Loads the value stored under `key`, or `None` if absent
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory adapter, mainly for tests
///
/// Clones share the same underlying map, so a handle kept outside the
/// store observes every save.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
