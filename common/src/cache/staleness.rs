use chrono::{DateTime, Duration, FixedOffset, Utc};

/// When a cached value stops being served without asking the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// Valid until the calendar date changes in the given timezone.
    SameDay(FixedOffset),
    /// Valid while younger than the window.
    Within(Duration),
}

impl Staleness {
    pub fn is_fresh(&self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Staleness::SameDay(offset) => {
                stored_at.with_timezone(offset).date_naive() == now.with_timezone(offset).date_naive()
            }
            Staleness::Within(window) => {
                let age = now.signed_duration_since(stored_at);
                age >= Duration::zero() && age < *window
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    #[test]
    fn same_day_follows_the_configured_timezone() {
        let policy = Staleness::SameDay(ist());
        // 17:00 UTC is 22:30 IST, 19:00 UTC is 00:30 IST the next day.
        let stored = Utc.with_ymd_and_hms(2025, 1, 10, 17, 0, 0).unwrap();
        let later_same_day = Utc.with_ymd_and_hms(2025, 1, 10, 18, 0, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2025, 1, 10, 19, 0, 0).unwrap();

        assert!(policy.is_fresh(stored, later_same_day));
        assert!(!policy.is_fresh(stored, next_day));
    }

    #[test]
    fn window_expires_at_its_length() {
        let policy = Staleness::Within(Duration::minutes(2));
        let stored = Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap();

        assert!(policy.is_fresh(stored, stored + Duration::seconds(90)));
        assert!(!policy.is_fresh(stored, stored + Duration::seconds(120)));
        assert!(!policy.is_fresh(stored, stored + Duration::seconds(130)));
    }

    #[test]
    fn timestamps_from_the_future_are_not_trusted() {
        let policy = Staleness::Within(Duration::minutes(2));
        let stored = Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap();
        assert!(!policy.is_fresh(stored, stored - Duration::seconds(5)));
    }
}
