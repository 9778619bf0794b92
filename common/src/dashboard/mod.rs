//! Dashboard aggregation: model rankings, headline statistics and the
//! hourly rating trend, cached for a short window.
//!
//! The functions here are pure over slices of ratings; `DashboardLoader`
//! adds the fetch-or-cache policy on top.

mod ranking;
mod snapshot;
mod stats;
mod trend;

use chrono::{Duration, FixedOffset, Offset, Utc};

pub use ranking::{ModelRanking, ScoredRating, rank_models};
pub use snapshot::{DashboardLoader, DashboardSnapshot, SnapshotOrigin, build_snapshot};
pub use stats::{GlobalStats, StarShare, global_stats};
pub use trend::{HourBucket, hour_label, hourly_trend};

/// Offset of the exhibition's local time, UTC+05:30.
pub const EXHIBITION_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// How long a cached snapshot is served without fetching.
    pub ttl: Duration,
    /// First hour bucket of the trend; earlier ratings fold into it.
    pub start_hour: u32,
    /// Last hour bucket of the trend; later ratings fold into it.
    pub end_hour: u32,
    pub offset: FixedOffset,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(2),
            start_hour: 9,
            end_hour: 21,
            offset: exhibition_offset(),
        }
    }
}

pub fn exhibition_offset() -> FixedOffset {
    FixedOffset::east_opt(EXHIBITION_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// Rounds to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_sends_halves_up() {
        assert_eq!(round2(4.005_000_1), 4.01);
        assert_eq!(round2(3.333_333), 3.33);
        assert_eq!(round2(2.0), 2.0);
    }
}
