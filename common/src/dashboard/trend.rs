use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::DashboardConfig;
use super::ranking::ScoredRating;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: u32,
    pub label: String,
    pub count: usize,
    /// Ratings up to and including this hour.
    pub cumulative: usize,
}

/// Twelve-hour clock label, e.g. `9 AM`, `12 PM`.
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}

/// Ratings per local hour between `start_hour` and `end_hour` inclusive.
///
/// Hours outside the window are folded into the first or last bucket.
/// Rows without a timestamp are skipped.
pub fn hourly_trend<R: ScoredRating>(ratings: &[R], config: &DashboardConfig) -> Vec<HourBucket> {
    let start = config.start_hour.min(23);
    let end = config.end_hour.clamp(start, 23);
    let mut counts = vec![0usize; (end - start + 1) as usize];

    for at in ratings.iter().filter_map(|r| r.rated_at()) {
        let hour = at.with_timezone(&config.offset).hour().clamp(start, end);
        counts[(hour - start) as usize] += 1;
    }

    let mut cumulative = 0;
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let hour = start + i as u32;
            cumulative += count;
            HourBucket {
                hour,
                label: hour_label(hour),
                count,
                cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rating::Rating;
    use chrono::{TimeZone, Utc};

    fn rated_at(hour_utc: u32, minute: u32) -> Rating {
        Rating {
            id: None,
            user_id: "a".to_string(),
            model_number: 1,
            star_rating: 4,
            comments: None,
            created_at: Some(Utc.with_ymd_and_hms(2025, 11, 3, hour_utc, minute, 0).unwrap()),
        }
    }

    #[test]
    fn hours_are_bucketed_in_exhibition_time_and_clamped() {
        let config = DashboardConfig::default();
        let ratings = vec![
            rated_at(1, 0),   // 06:30 local, before opening
            rated_at(4, 0),   // 09:30 local
            rated_at(4, 45),  // 10:15 local
            rated_at(17, 0),  // 22:30 local, after closing
            rated_at(15, 29), // 20:59 local
        ];
        let trend = hourly_trend(&ratings, &config);

        assert_eq!(trend.len(), 13);
        assert_eq!(trend[0].label, "9 AM");
        assert_eq!(trend[0].count, 2);
        assert_eq!(trend[1].count, 1);
        assert_eq!(trend[11].hour, 20);
        assert_eq!(trend[11].count, 1);
        assert_eq!(trend[12].count, 1);
        assert_eq!(trend[12].cumulative, 5);
    }

    #[test]
    fn labels_use_a_twelve_hour_clock() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(21), "9 PM");
    }
}
