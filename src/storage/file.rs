//! File-backed storage
//!
//! Each key maps to `<dir>/<key>.json`. Reads take a shared lock; writes
//! go to a temp file under an exclusive lock and land via atomic rename,
//! so readers never observe a partial write.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use fs2::FileExt;

use super::adapter::{StorageAdapter, StorageError};

/// Stores each key as a JSON file in a single directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file backing a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageAdapter for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path).map_err(|e| StorageError::read(key, e))?;
        file.lock_shared().map_err(|e| StorageError::read(key, e))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| StorageError::read(key, e))?;

        // Lock is released when the handle drops
        Ok(Some(contents))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::write(key, e))?;

        let path = self.path_for(key);
        let temp_path = self.dir.join(format!("{}.json.tmp", key));

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StorageError::write(key, e))?;

            file.lock_exclusive().map_err(|e| StorageError::write(key, e))?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(value.as_bytes())
                .map_err(|e| StorageError::write(key, e))?;
            writer.flush().map_err(|e| StorageError::write(key, e))?;
        }

        fs::rename(&temp_path, &path).map_err(|e| StorageError::write(key, e))
    }
}
