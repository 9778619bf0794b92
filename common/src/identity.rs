//! Anonymous visitor identity.
//!
//! Each browser gets one identifier the first time it is needed. The value is
//! the decimal concatenation of a random integer in `100..=998`, the current
//! epoch milliseconds with digits reversed, and a random integer in
//! `10..=99`, read back as an integer and written in base 16. Once stored it
//! is only replaced through [`adopt_identity`], after the service merged a
//! registration into an existing record.

use std::fmt;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::{KeyValueStore, LocalCache, keys};
use crate::clock::Clock;
use crate::error::CacheError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorId(String);

impl VisitorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VisitorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Random numbers for identity synthesis.
pub trait EntropySource {
    fn next_u32(&self) -> u32;

    /// Uniform-ish value in `low..=high`.
    fn in_range(&self, low: u32, high: u32) -> u32 {
        low + self.next_u32() % (high - low + 1)
    }
}

/// Draws from UUID v4 random bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidEntropy;

impl EntropySource for UuidEntropy {
    fn next_u32(&self) -> u32 {
        (Uuid::new_v4().as_u128() >> 64) as u32
    }
}

/// Builds an identifier from a timestamp and two random draws.
pub fn synthesize(at: DateTime<Utc>, entropy: &impl EntropySource) -> VisitorId {
    let prefix = entropy.in_range(100, 998);
    let reversed: String = at.timestamp_millis().to_string().chars().rev().collect();
    let suffix = entropy.in_range(10, 99);
    let digits = format!("{prefix}{reversed}{suffix}");
    // 3 + 13 + 2 digits, always within u128.
    let value: u128 = digits.parse().unwrap_or_default();
    VisitorId(format!("{value:x}"))
}

/// Stored identity, if one was assigned.
pub fn current_identity<S: KeyValueStore>(cache: &LocalCache<S>) -> Option<VisitorId> {
    cache.get_raw(keys::VISITOR_ID).map(VisitorId)
}

/// Returns the stored identity, creating and persisting one when absent.
pub fn ensure_identity<S: KeyValueStore>(
    cache: &LocalCache<S>,
    clock: &impl Clock,
    entropy: &impl EntropySource,
) -> Result<VisitorId, CacheError> {
    if let Some(existing) = current_identity(cache) {
        return Ok(existing);
    }
    let id = synthesize(clock.now(), entropy);
    cache.set_raw(keys::VISITOR_ID, id.as_str())?;
    info!("Assigned visitor identity {id}");
    Ok(id)
}

/// Replaces the stored identity with the one the service kept for this visitor.
pub fn adopt_identity<S: KeyValueStore>(cache: &LocalCache<S>, id: &VisitorId) -> Result<(), CacheError> {
    match current_identity(cache) {
        Some(old) if old == *id => return Ok(()),
        Some(old) => warn!("Visitor identity {old} superseded by {id}"),
        None => {}
    }
    cache.set_raw(keys::VISITOR_ID, id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone};
    use std::cell::Cell;

    struct Counting {
        next: Cell<u32>,
    }

    impl EntropySource for Counting {
        fn next_u32(&self) -> u32 {
            let n = self.next.get();
            self.next.set(n.wrapping_add(1));
            n
        }
    }

    #[test]
    fn identity_is_the_hex_of_the_digit_concatenation() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let entropy = Counting { next: Cell::new(0) };
        // Draws 0 and 1 give prefix 100 and suffix 11.
        let id = synthesize(at, &entropy);
        let expected: u128 = "100321000000007111".parse().unwrap();
        assert_eq!(id.as_str(), format!("{expected:x}"));
    }

    #[test]
    fn draws_stay_inside_their_ranges() {
        let entropy = Counting { next: Cell::new(u32::MAX - 5) };
        for _ in 0..10 {
            let v = entropy.in_range(100, 998);
            assert!((100..=998).contains(&v));
        }
    }

    #[test]
    fn identity_is_written_once() {
        let store = MemoryStore::new();
        let cache = LocalCache::new(&store);
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap());

        let first = ensure_identity(&cache, &clock, &UuidEntropy).unwrap();
        clock.advance(Duration::hours(3));
        let second = ensure_identity(&cache, &clock, &UuidEntropy).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.get(keys::VISITOR_ID).as_deref(), Some(first.as_str()));
    }

    #[test]
    fn adoption_replaces_the_stored_value() {
        let store = MemoryStore::new();
        store.set(keys::VISITOR_ID, "abc123").unwrap();
        let cache = LocalCache::new(&store);

        adopt_identity(&cache, &VisitorId::new("ffe01")).unwrap();
        assert_eq!(current_identity(&cache), Some(VisitorId::new("ffe01")));
    }
}
