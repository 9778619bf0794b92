use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ranking::{ModelRanking, ScoredRating};
use super::round2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarShare {
    pub stars: u8,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_ratings: usize,
    pub unique_visitors: usize,
    /// Mean over ratings of each rating's own category mean.
    pub average_score: f64,
    pub models_rated: usize,
    /// One entry per star value, 1 to 5.
    pub distribution: Vec<StarShare>,
}

impl Default for GlobalStats {
    fn default() -> Self {
        Self {
            total_ratings: 0,
            unique_visitors: 0,
            average_score: 0.0,
            models_rated: 0,
            distribution: (1..=5)
                .map(|stars| StarShare {
                    stars,
                    count: 0,
                    percent: 0.0,
                })
                .collect(),
        }
    }
}

pub fn global_stats<R: ScoredRating>(ratings: &[R], rankings: &[ModelRanking]) -> GlobalStats {
    let mut stats = GlobalStats {
        models_rated: rankings.iter().filter(|r| r.rating_count > 0).count(),
        ..GlobalStats::default()
    };
    if ratings.is_empty() {
        return stats;
    }

    let visitors: HashSet<&str> = ratings.iter().map(|r| r.visitor_key()).collect();
    let means: Vec<f64> = ratings.iter().map(|r| r.own_mean()).collect();

    stats.total_ratings = ratings.len();
    stats.unique_visitors = visitors.len();
    stats.average_score = round2(means.iter().sum::<f64>() / means.len() as f64);

    for mean in means {
        let stars = mean.round().clamp(1.0, 5.0) as usize;
        stats.distribution[stars - 1].count += 1;
    }
    for share in &mut stats.distribution {
        share.percent = round2(share.count as f64 / ratings.len() as f64 * 100.0);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rating::Rating;

    fn stars(model_number: u32, user_id: &str, star_rating: u8) -> Rating {
        Rating {
            id: None,
            user_id: user_id.to_string(),
            model_number,
            star_rating,
            comments: None,
            created_at: None,
        }
    }

    #[test]
    fn unique_visitors_count_distinct_identities() {
        let ratings = vec![
            stars(1, "a", 5),
            stars(2, "a", 4),
            stars(1, "b", 3),
            stars(3, "c", 4),
        ];
        let stats = global_stats(&ratings, &[]);
        assert_eq!(stats.total_ratings, 4);
        assert_eq!(stats.unique_visitors, 3);
        assert_eq!(stats.average_score, 4.0);
    }

    #[test]
    fn distribution_covers_every_star_value() {
        let ratings = vec![stars(1, "a", 5), stars(1, "b", 5), stars(1, "c", 1), stars(1, "d", 4)];
        let stats = global_stats(&ratings, &[]);
        let counts: Vec<usize> = stats.distribution.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1, 2]);
        assert_eq!(stats.distribution[4].percent, 50.0);
    }

    #[test]
    fn no_ratings_gives_zeroed_stats() {
        let stats = global_stats::<Rating>(&[], &[]);
        assert_eq!(stats, GlobalStats::default());
        assert_eq!(stats.distribution.len(), 5);
    }
}
