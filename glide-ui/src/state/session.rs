//! Browser session store
//!
//! `localStorage` backed implementation of the dashboard session store.

use std::collections::BTreeMap;
use wasm_bindgen::JsValue;

use glide_dashboard::session::{SessionError, SessionStore};

/// Session identifiers kept in the browser's `localStorage`
pub struct LocalStorageSession {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageSession {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorage unavailable, session is empty".into());
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, SessionError> {
        self.storage
            .as_ref()
            .ok_or_else(|| SessionError::Unavailable("localStorage".to_string()))
    }
}

fn storage_error(e: JsValue) -> SessionError {
    SessionError::Unavailable(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl SessionStore for LocalStorageSession {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.storage()?
            .set_item(key, value)
            .map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.storage()?
            .remove_item(key)
            .map_err(storage_error)
    }

    fn entries(&self) -> BTreeMap<String, String> {
        let Some(storage) = &self.storage else {
            return BTreeMap::new();
        };
        let len = storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .filter_map(|key| {
                let value = storage.get_item(&key).ok().flatten()?;
                Some((key, value))
            })
            .collect()
    }
}
