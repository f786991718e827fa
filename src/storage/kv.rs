//! Key-value persistence backends
//!
//! The rest of the crate talks to storage through [`KeyValueStore`], so the
//! session logic can be exercised against an in-memory store in tests. The
//! file backend keeps one JSON file per key under the data directory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Minimal string key-value surface over whatever holds the data
pub trait KeyValueStore {
    /// Read the value for a key, `None` if the key has never been set
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key, overwriting any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; deleting an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed store: one file per key under `<dir>/store/`
pub struct FileStore {
    store_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            store_dir: data_dir.join("store"),
        }
    }

    /// Default data directory for the current platform
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("learndx"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Create the backing directory if it does not exist yet
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.store_dir)?;
        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.store_dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.init()?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Turn a storage key into a portable file name
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// In-memory store for tests and ephemeral runs
///
/// Single-threaded, like the rest of the crate; the interior RefCell lets it
/// share the `&self` signatures of the file backend.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
