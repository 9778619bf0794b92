use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, Staleness};
use crate::error::CacheError;

/// Typed view over a `KeyValueStore`.
///
/// Values are stored as JSON and timestamps as RFC 3339 strings. A value that
/// fails to parse is treated as absent and logged, never propagated.
#[derive(Debug, Clone)]
pub struct LocalCache<S> {
    store: S,
}

impl<S: KeyValueStore> LocalCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }

    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store.set(key, value)
    }

    pub fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding unreadable cache entry {key}: {e}");
                None
            }
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let encoded = serde_json::to_string(value).map_err(|source| CacheError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &encoded)
    }

    pub fn get_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let raw = self.get_raw(key)?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(e) => {
                warn!("Discarding unreadable timestamp {key}: {e}");
                None
            }
        }
    }

    pub fn set_timestamp(&self, key: &str, at: DateTime<Utc>) -> Result<(), CacheError> {
        self.store.set(key, &at.to_rfc3339())
    }

    /// Returns the value under `key` only when `stamp_key` is fresh under `policy`.
    pub fn get_fresh<T: DeserializeOwned>(
        &self,
        key: &str,
        stamp_key: &str,
        policy: Staleness,
        now: DateTime<Utc>,
    ) -> Option<T> {
        let stored_at = self.get_timestamp(stamp_key)?;
        if !policy.is_fresh(stored_at, now) {
            return None;
        }
        self.get_json(key)
    }

    /// Writes `value` under `key` and records `at` under `stamp_key`.
    pub fn set_stamped<T: Serialize + ?Sized>(
        &self,
        key: &str,
        stamp_key: &str,
        value: &T,
        at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        self.set_json(key, value)?;
        self.set_timestamp(stamp_key, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use chrono::{Duration, TimeZone};

    #[test]
    fn unreadable_json_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        let cache = LocalCache::new(&store);
        assert_eq!(cache.get_json::<Vec<u32>>("k"), None);
    }

    #[test]
    fn stamped_values_follow_their_policy() {
        let cache = LocalCache::new(MemoryStore::new());
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        cache.set_stamped("v", "v_at", &vec![1, 2, 3], at).unwrap();

        let policy = Staleness::Within(Duration::minutes(2));
        assert_eq!(
            cache.get_fresh::<Vec<u32>>("v", "v_at", policy, at + Duration::seconds(30)),
            Some(vec![1, 2, 3])
        );
        assert_eq!(
            cache.get_fresh::<Vec<u32>>("v", "v_at", policy, at + Duration::minutes(5)),
            None
        );
        // The stale value is still there for fallbacks.
        assert_eq!(cache.get_json::<Vec<u32>>("v"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn empty_strings_are_absent() {
        let cache = LocalCache::new(MemoryStore::new());
        cache.set_raw("user_id", "").unwrap();
        assert_eq!(cache.get_raw("user_id"), None);
    }
}
