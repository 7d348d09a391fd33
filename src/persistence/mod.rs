//! Key-value persistence for settings and best score
//!
//! Features:
//! - `KeyValueStore` trait so game code never touches the browser directly
//! - LocalStorage backend (wasm32)
//! - In-memory backend (native builds and tests)
//! - Loads never fail: callers fall back to defaults on missing/corrupt data

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached (no window, storage disabled, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Backend rejected the operation (quota, security error, ...)
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal string key-value store (LocalStorage semantics)
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Volatile store used on native and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
