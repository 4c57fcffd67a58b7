//! Key-value slots backing the stream store.
//!
//! A slot holds one string value per key. Values are always rewritten
//! whole; there is no partial update and no history.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from reading or writing a slot
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),

    #[error("Failed to read slot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write slot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A namespaced key-value backend
pub trait KvSlot {
    /// Read the value under `key`, `None` if it was never written
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Replace the value under `key`
    fn write(&self, key: &str, value: &str) -> Result<(), SlotError>;
}

impl<S: KvSlot + ?Sized> KvSlot for &S {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        (**self).write(key, value)
    }
}

/// File-backed slot: each key is stored as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Create a slot rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the slot in the configured home directory
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(crate::config::sportcast_home()?))
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(SlotError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KvSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| SlotError::Read { path, source })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        let write_err = |source| SlotError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(write_err)?;

        // Truncate only once the lock is held
        file.lock_exclusive().map_err(write_err)?;
        file.set_len(0).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        // Lock is released when file is dropped
        Ok(())
    }
}

/// In-memory slot, used by tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: RefCell<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot with one value already present
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let slot = Self::new();
        slot.values.borrow_mut().insert(key.into(), value.into());
        slot
    }

    /// Current raw value under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KvSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_slot_missing_key_reads_none() {
        let temp = TempDir::new().unwrap();
        let slot = FileSlot::new(temp.path());

        assert!(slot.read("sportStreams").unwrap().is_none());
    }

    #[test]
    fn test_file_slot_write_then_read() {
        let temp = TempDir::new().unwrap();
        let slot = FileSlot::new(temp.path().join("nested"));

        slot.write("sportStreams", "[1,2,3]").unwrap();
        assert_eq!(slot.read("sportStreams").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(temp.path().join("nested").join("sportStreams.json").exists());
    }

    #[test]
    fn test_file_slot_rewrite_shrinks_value() {
        let temp = TempDir::new().unwrap();
        let slot = FileSlot::new(temp.path());

        slot.write("k", "a much longer first value").unwrap();
        slot.write("k", "short").unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_file_slot_rejects_path_like_keys() {
        let slot = FileSlot::new("/tmp");

        assert!(matches!(slot.path_for("../etc"), Err(SlotError::InvalidKey(_))));
        assert!(matches!(slot.path_for("a/b"), Err(SlotError::InvalidKey(_))));
        assert!(matches!(slot.path_for(""), Err(SlotError::InvalidKey(_))));
        assert!(slot.path_for("sport-streams_v1").is_ok());
    }

    #[test]
    fn test_memory_slot() {
        let slot = MemorySlot::with_value("a", "1");
        assert_eq!(slot.read("a").unwrap().as_deref(), Some("1"));

        slot.write("a", "2").unwrap();
        assert_eq!(slot.get("a").as_deref(), Some("2"));
        assert!(slot.read("b").unwrap().is_none());
    }
}
