//! Repeat-visit detection from the last recorded visit time.

use chrono::{DateTime, Duration, Utc};

use crate::cache::{KeyValueStore, LocalCache, keys};
use crate::error::CacheError;

/// Hours after which a visitor counts as returning.
pub const RETURN_AFTER_HOURS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitKind {
    First,
    Returning,
    SameVisit,
}

/// Classifies the visit at `now`, recording `now` unless it is the same visit.
pub fn track_visit<S: KeyValueStore>(cache: &LocalCache<S>, now: DateTime<Utc>) -> Result<VisitKind, CacheError> {
    let kind = match cache.get_timestamp(keys::LATEST_VISIT) {
        None => VisitKind::First,
        Some(last) if (now - last).abs() > Duration::hours(RETURN_AFTER_HOURS) => VisitKind::Returning,
        Some(_) => VisitKind::SameVisit,
    };
    if kind != VisitKind::SameVisit {
        cache.set_timestamp(keys::LATEST_VISIT, now)?;
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn visits_are_classified_by_the_four_hour_gap() {
        let cache = LocalCache::new(MemoryStore::new());
        let at = Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap();

        assert_eq!(track_visit(&cache, at).unwrap(), VisitKind::First);
        assert_eq!(track_visit(&cache, at + Duration::hours(4)).unwrap(), VisitKind::SameVisit);
        assert_eq!(
            track_visit(&cache, at + Duration::hours(4) + Duration::minutes(1)).unwrap(),
            VisitKind::Returning
        );
        // The returning visit reset the reference point.
        assert_eq!(track_visit(&cache, at + Duration::hours(6)).unwrap(), VisitKind::SameVisit);
    }
}
