//! Durable key-value storage
//!
//! Features:
//! - LocalStorage-shaped trait (string values, JSON encoded by callers)
//! - In-memory backend for tests and headless runs
//! - File backend with atomic replace (tmp → rename)
//! - Browser LocalStorage backend on wasm32

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod local;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Process-wide string store keyed by name
pub trait KeyValueStore {
    /// Raw value stored under `key`, `None` if absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`; durable before the next read returns
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop `key` if present
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Read and decode a JSON value, treating every failure as "nothing stored"
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding corrupt value under '{}': {}", key, e);
            None
        }
    }
}

/// Encode a value as JSON and store it
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set_item(key, &json)
}
