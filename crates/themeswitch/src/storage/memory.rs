//! In-memory store.

use std::collections::HashMap;

use super::{PreferenceStore, StorageError};

/// A [`PreferenceStore`] held in process memory.
///
/// Useful in tests and as the session-only fallback when no durable store is
/// available. [`MemoryStore::rejecting`] builds a store that refuses every
/// write, mimicking a browser in privacy mode or over quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `set` and `remove` always fail.
    pub fn rejecting() -> Self {
        Self {
            entries: HashMap::new(),
            reject_writes: true,
        }
    }

    /// Seeds a value, bypassing write rejection.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    fn check_writable(&self, key: &str) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.entries.remove(key);
        Ok(())
    }
}
