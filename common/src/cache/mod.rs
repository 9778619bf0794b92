//! Client-side key/value cache.
//!
//! The cache mirrors remote state so the visitor app can answer quickly and
//! survive flaky connectivity. It is advisory: every answer it gives may be
//! replaced by what the remote store says. Storage access always goes through
//! the `KeyValueStore` trait so the browser's local storage can be swapped for
//! `MemoryStore` in tests.

mod local;
mod memory;
mod staleness;

use std::rc::Rc;

use crate::error::CacheError;

pub use local::LocalCache;
pub use memory::MemoryStore;
pub use staleness::Staleness;

/// Keys written to the store. Values are kept compatible with older clients.
pub mod keys {
    pub const VISITOR_ID: &str = "user_id";
    pub const MODELS: &str = "modelsCache";
    pub const MODELS_DATE: &str = "modelsCacheDate";
    pub const RATED_MODELS: &str = "ratedModels";
    pub const DASHBOARD: &str = "dashboardMetrics";
    pub const DASHBOARD_TIME: &str = "dashboardCacheTime";
    pub const LATEST_VISIT: &str = "latestVisit";
    pub const CURRENT_USER: &str = "current_user";
    pub const DEAD_LETTERS: &str = "mirrorDeadLetters";
    pub const MIRROR_FAILURES: &str = "mirrorFailureCount";
}

/// String key/value persistence.
///
/// Methods take `&self`: browser storage is mutated through a shared handle,
/// and the in-memory variant uses interior mutability to match.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
