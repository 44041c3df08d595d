//! Browser `localStorage` backend (WASM only).

use super::{KeyValueStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;

/// Store backed by `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

fn js_error(context: &str, e: JsValue) -> StorageError {
    StorageError::Other(format!("{}: {:?}", context, e))
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage access denied", e))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("getItem failed", e))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("setItem failed", e))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error("removeItem failed", e))
    }
}
