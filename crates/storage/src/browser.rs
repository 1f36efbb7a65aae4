//! `window.localStorage` backend.

use wasm_bindgen::JsValue;

use crate::kv::KeyValueStore;
use crate::repository::StorageError;

/// Durable browser-local store backed by the Web Storage API.
#[derive(Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    #[must_use]
    pub fn new(storage: web_sys::Storage) -> Self {
        Self { storage }
    }

    /// Resolve `localStorage` from the given window.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when storage is disabled or blocked
    /// (private browsing, sandboxed iframes, file:// origins in some browsers).
    pub fn from_window(window: &web_sys::Window) -> Result<Self, StorageError> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self::new(storage)),
            Ok(None) => Err(StorageError::Unavailable(
                "localStorage is not available".to_owned(),
            )),
            Err(err) => Err(StorageError::Unavailable(describe(&err))),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(describe(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write(describe(&err)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|err| StorageError::Write(describe(&err)))
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
