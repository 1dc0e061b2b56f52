//! Durable key/value storage for the persisted preference.
//!
//! This module provides:
//!
//! - [`PreferenceStore`]: the read/write/remove contract the controller uses
//! - [`MemoryStore`]: an in-process store, optionally refusing writes
//! - [`FileStore`]: a per-origin JSON file on disk
//!
//! With the `web` feature, `themeswitch::web::WebStorage` wraps
//! `window.localStorage`.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::{origin_slug, FileStore};
pub use memory::MemoryStore;

/// A string key/value store scoped to one origin.
pub trait PreferenceStore {
    /// Reads `key`, returning `Ok(None)` when it is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
