//! `localStorage` behind the cache trait.

use common::cache::KeyValueStore;
use common::error::CacheError;
use web_sys::Storage;

/// Handle on the window's `localStorage`. Private browsing modes can deny
/// access; the store then reads as empty and rejects writes.
#[derive(Clone, Default)]
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            gloo_console::warn!("localStorage is unavailable; nothing will be cached");
        }
        Self { storage }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let Some(storage) = &self.storage else {
            return Err(CacheError::Write {
                key: key.to_string(),
                reason: "localStorage is unavailable".to_string(),
            });
        };
        storage.set_item(key, value).map_err(|e| CacheError::Write {
            key: key.to_string(),
            reason: format!("{e:?}"),
        })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            storage.remove_item(key).ok();
        }
    }
}
