//! Browser LocalStorage backend (wasm32 only)

use super::KeyValueStore;
use crate::error::StorageError;

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("window.localStorage".into()))?;
        Ok(Self { storage })
    }
}

fn js_err(op: &str, key: &str, err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("localStorage {} '{}' failed: {:?}", op, key, err))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| js_err("get", key, e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| js_err("set", key, e))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(|e| js_err("remove", key, e))
    }
}
