//! Key-value backend abstraction.
//!
//! The store persists each collection as one serialized string under one
//! key, the way a browser's local storage holds values. Any backend that can
//! get, set and remove strings by key can host a store.

use mandap_core::{MandapResult, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Storage capability injected into an `EntityStore`.
pub trait KeyValueBackend: Send + Sync {
    /// Read the value under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> MandapResult<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: String) -> MandapResult<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> MandapResult<()>;

    /// Delete every key.
    fn clear(&self) -> MandapResult<()>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Arc<B> {
    fn get(&self, key: &str) -> MandapResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> MandapResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> MandapResult<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> MandapResult<()> {
        (**self).clear()
    }
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn get(&self, key: &str) -> MandapResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> MandapResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> MandapResult<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> MandapResult<()> {
        (**self).clear()
    }
}

// ============================================================================
// IN-MEMORY BACKEND
// ============================================================================

/// In-memory backend. Clones share the same map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` has been written.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|e| e.contains_key(key))
            .unwrap_or(false)
    }
}

impl KeyValueBackend for InMemoryBackend {
    fn get(&self, key: &str) -> MandapResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> MandapResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> MandapResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> MandapResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.clear();
        Ok(())
    }
}
