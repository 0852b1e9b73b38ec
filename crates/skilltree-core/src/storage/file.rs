use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{StorageConfig, DEFAULT_STATE_EXTENSION};

use super::error::StorageError;
use super::{validate_key, KeyValueStore};

/// File-based key-value store.
///
/// Each key is one file under the data directory:
/// ```text
/// .skilltree/
///   skillTreeState.json     # value stored under "skillTreeState"
/// ```
///
/// Values are written to a temporary sibling first and renamed into place,
/// so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `base_path`. The directory is created on
    /// first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Creates a store rooted at the configured data directory.
    pub fn with_config(config: &StorageConfig) -> Self {
        Self::new(config.data_path())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path of the file backing `key`.
    fn value_file(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", key, DEFAULT_STATE_EXTENSION))
    }

    /// Ensures the data directory exists.
    fn ensure_base_dir(&self) -> Result<(), StorageError> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path).map_err(|e| StorageError::io(&self.base_path, e))?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;

        let path = self.value_file(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.ensure_base_dir()?;

        let path = self.value_file(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        let path = self.value_file(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::io(&path, e))?;
        }

        Ok(())
    }
}
