//! Best-effort copy of every accepted rating to an external form collector.
//!
//! The mirror never blocks or fails a rating. Delivery problems are recorded
//! in a bounded [`DeadLetterLog`] kept in the local cache, together with a
//! running failure count that operators can read from the admin panel.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::cache::{KeyValueStore, LocalCache, keys};
use crate::error::CacheError;
use crate::model::rating::NewRating;
use crate::qr::encode_component;

/// Dead letters kept before the oldest are dropped.
pub const DEFAULT_DEAD_LETTER_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorEntry {
    pub model_number: u32,
    pub star_rating: u8,
    pub user_id: String,
}

impl From<&NewRating> for MirrorEntry {
    fn from(rating: &NewRating) -> Self {
        Self {
            model_number: rating.model_number,
            star_rating: rating.star_rating,
            user_id: rating.user_id.clone(),
        }
    }
}

/// Form collector address and the query field carrying each value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEndpoint {
    pub base_url: String,
    pub model_field: String,
    pub stars_field: String,
    pub user_field: String,
}

impl Default for MirrorEndpoint {
    fn default() -> Self {
        Self {
            base_url: "https://docs.google.com/forms/d/e/1FAIpQLSfY9rly6Kuc4E43TA_zV0-nhJV4ZgQjrOkkNbjly_p7b7A2OA/formResponse"
                .to_string(),
            model_field: "entry.299367324".to_string(),
            stars_field: "entry.381056859".to_string(),
            user_field: "entry.1501257721".to_string(),
        }
    }
}

impl MirrorEndpoint {
    pub fn url_for(&self, entry: &MirrorEntry) -> String {
        format!(
            "{}?{}={}&{}={}&{}={}",
            self.base_url,
            self.model_field,
            entry.model_number,
            self.stars_field,
            entry.star_rating,
            self.user_field,
            encode_component(&entry.user_id),
        )
    }
}

/// Fire-and-forget side channel for accepted ratings.
pub trait MirrorSink {
    fn dispatch(&self, entry: MirrorEntry);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMirror;

impl MirrorSink for NoMirror {
    fn dispatch(&self, _entry: MirrorEntry) {}
}

impl<T: MirrorSink + ?Sized> MirrorSink for &T {
    fn dispatch(&self, entry: MirrorEntry) {
        (**self).dispatch(entry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadLetter {
    pub entry: MirrorEntry,
    pub reason: String,
    pub failed_at: DateTime<Utc>,
}

/// Persisted log of mirror deliveries that failed.
#[derive(Debug, Clone)]
pub struct DeadLetterLog<S> {
    cache: LocalCache<S>,
    capacity: usize,
}

impl<S: KeyValueStore> DeadLetterLog<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, DEFAULT_DEAD_LETTER_CAPACITY)
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self {
            cache: LocalCache::new(store),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&self, entry: MirrorEntry, reason: impl Into<String>, at: DateTime<Utc>) -> Result<(), CacheError> {
        let reason = reason.into();
        warn!(
            "Mirror delivery failed for model {} ({}): {reason}",
            entry.model_number, entry.user_id
        );
        let mut letters = self.entries();
        letters.push(DeadLetter {
            entry,
            reason,
            failed_at: at,
        });
        if letters.len() > self.capacity {
            let excess = letters.len() - self.capacity;
            letters.drain(..excess);
        }
        self.cache.set_json(keys::DEAD_LETTERS, &letters)?;
        self.cache
            .set_json(keys::MIRROR_FAILURES, &(self.failure_count() + 1))
    }

    /// Retained dead letters, oldest first.
    pub fn entries(&self) -> Vec<DeadLetter> {
        self.cache.get_json(keys::DEAD_LETTERS).unwrap_or_default()
    }

    /// Failures since the log was last cleared, including dropped letters.
    pub fn failure_count(&self) -> u64 {
        self.cache.get_json(keys::MIRROR_FAILURES).unwrap_or_default()
    }

    pub fn clear(&self) {
        self.cache.remove(keys::DEAD_LETTERS);
        self.cache.remove(keys::MIRROR_FAILURES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use chrono::TimeZone;

    fn entry(model_number: u32) -> MirrorEntry {
        MirrorEntry {
            model_number,
            star_rating: 4,
            user_id: "abc123".to_string(),
        }
    }

    #[test]
    fn url_carries_model_stars_and_visitor() {
        let url = MirrorEndpoint::default().url_for(&entry(7));
        assert!(url.ends_with(
            "formResponse?entry.299367324=7&entry.381056859=4&entry.1501257721=abc123"
        ));
    }

    #[test]
    fn log_is_bounded_but_count_keeps_growing() {
        let store = MemoryStore::new();
        let log = DeadLetterLog::with_capacity(&store, 2);
        let at = Utc.with_ymd_and_hms(2025, 11, 1, 12, 0, 0).unwrap();

        for model in 1..=3 {
            log.record(entry(model), "offline", at).unwrap();
        }

        let kept: Vec<u32> = log.entries().iter().map(|l| l.entry.model_number).collect();
        assert_eq!(kept, vec![2, 3]);
        assert_eq!(log.failure_count(), 3);

        log.clear();
        assert!(log.entries().is_empty());
        assert_eq!(log.failure_count(), 0);
    }
}
