//! JSON file backend.
//!
//! All keys live in one JSON object on disk. The file is loaded once on open
//! and rewritten after every mutation.

use crate::backend::KeyValueBackend;
use mandap_core::{MandapResult, StorageError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// File-backed key-value store.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

fn io_error(path: &Path, err: impl std::fmt::Display) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

impl JsonFileBackend {
    /// Open the backend at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> MandapResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| StorageError::CorruptData {
                    key: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened data file");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole map through a temporary file and rename it into place.
    fn persist(&self, entries: &BTreeMap<String, String>) -> MandapResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
            }
        }
        let contents = serde_json::to_string_pretty(entries).map_err(|e| io_error(&self.path, e))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| io_error(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;
        Ok(())
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get(&self, key: &str) -> MandapResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> MandapResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        let previous = entries.insert(key.to_string(), value);
        if let Err(err) = self.persist(&entries) {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> MandapResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        if let Some(old) = entries.remove(key) {
            if let Err(err) = self.persist(&entries) {
                entries.insert(key.to_string(), old);
                return Err(err);
            }
        }
        Ok(())
    }

    fn clear(&self) -> MandapResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        let previous = std::mem::take(&mut *entries);
        if let Err(err) = self.persist(&entries) {
            *entries = previous;
            return Err(err);
        }
        Ok(())
    }
}
