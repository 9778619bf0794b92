use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::round2;
use crate::model::exhibit::Exhibit;
use crate::model::rating::{CategoryRating, Rating};

/// A rating that can be aggregated: one or more category scores per row.
pub trait ScoredRating {
    /// Category labels, in the order `scores` returns them.
    const CATEGORIES: &'static [&'static str];

    fn model_number(&self) -> u32;
    /// Identifies the rater for unique-visitor counts.
    fn visitor_key(&self) -> &str;
    fn scores(&self) -> Vec<f64>;
    fn rated_at(&self) -> Option<DateTime<Utc>>;

    /// Mean of this row's own category scores.
    fn own_mean(&self) -> f64 {
        let scores = self.scores();
        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        }
    }
}

impl ScoredRating for Rating {
    const CATEGORIES: &'static [&'static str] = &["Stars"];

    fn model_number(&self) -> u32 {
        self.model_number
    }

    fn visitor_key(&self) -> &str {
        &self.user_id
    }

    fn scores(&self) -> Vec<f64> {
        vec![f64::from(self.star_rating)]
    }

    fn rated_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl ScoredRating for CategoryRating {
    const CATEGORIES: &'static [&'static str] = &CategoryRating::CATEGORY_LABELS;

    fn model_number(&self) -> u32 {
        self.model_number
    }

    fn visitor_key(&self) -> &str {
        &self.device_fingerprint
    }

    fn scores(&self) -> Vec<f64> {
        [
            self.design_craftsmanship,
            self.historical_accuracy,
            self.volunteer_explanation,
            self.educational_value,
            self.overall_experience,
        ]
        .into_iter()
        .map(f64::from)
        .collect()
    }

    fn rated_at(&self) -> Option<DateTime<Utc>> {
        self.rating_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRanking {
    pub model_number: u32,
    pub name: String,
    pub location: String,
    pub rating_count: usize,
    /// Per-category means, rounded to two decimals.
    pub category_means: Vec<f64>,
    pub composite: f64,
}

/// Ranks every exhibit by composite score, highest first.
///
/// Exhibits nobody rated stay in the list with zero scores. Ties keep the
/// order of `exhibits`.
pub fn rank_models<R: ScoredRating>(exhibits: &[Exhibit], ratings: &[R]) -> Vec<ModelRanking> {
    let categories = R::CATEGORIES.len();
    let mut rankings: Vec<ModelRanking> = exhibits
        .iter()
        .map(|exhibit| {
            let rows: Vec<&R> = ratings
                .iter()
                .filter(|r| r.model_number() == exhibit.model_number)
                .collect();

            let mut sums = vec![0.0; categories];
            for row in &rows {
                for (sum, score) in sums.iter_mut().zip(row.scores()) {
                    *sum += score;
                }
            }
            let means: Vec<f64> = if rows.is_empty() {
                sums
            } else {
                sums.into_iter().map(|s| s / rows.len() as f64).collect()
            };
            let composite = if categories == 0 {
                0.0
            } else {
                means.iter().sum::<f64>() / categories as f64
            };

            ModelRanking {
                model_number: exhibit.model_number,
                name: exhibit.name_en.clone(),
                location: exhibit.location.clone(),
                rating_count: rows.len(),
                category_means: means.into_iter().map(round2).collect(),
                composite: round2(composite),
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.composite.total_cmp(&a.composite));
    rankings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exhibit(model_number: u32) -> Exhibit {
        Exhibit {
            id: None,
            model_number,
            name_en: format!("Model {model_number}"),
            name_ur: String::new(),
            name_kn: String::new(),
            description_en: String::new(),
            description_ur: String::new(),
            description_kn: String::new(),
            location: "Hall A".to_string(),
            visited: 0,
            rating_submitted: false,
        }
    }

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
    fn mean_of_four_five_three_is_four() {
        let ratings = vec![stars(1, "a", 4), stars(1, "b", 5), stars(1, "c", 3)];
        let ranked = rank_models(&[exhibit(1)], &ratings);
        assert_eq!(ranked[0].composite, 4.0);
        assert_eq!(ranked[0].rating_count, 3);
    }

    #[test]
    fn unrated_models_stay_with_zero_scores() {
        let ratings = vec![stars(2, "a", 3)];
        let ranked = rank_models(&[exhibit(1), exhibit(2)], &ratings);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].model_number, 2);
        assert_eq!(ranked[1].model_number, 1);
        assert_eq!(ranked[1].composite, 0.0);
        assert_eq!(ranked[1].category_means, vec![0.0]);
    }

    #[test]
    fn ties_keep_exhibit_order() {
        let ratings = vec![stars(3, "a", 4), stars(1, "a", 4), stars(2, "a", 5)];
        let ranked = rank_models(&[exhibit(1), exhibit(2), exhibit(3)], &ratings);
        let order: Vec<u32> = ranked.iter().map(|r| r.model_number).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn category_ratings_average_each_category_then_the_means() {
        let row = |design: u8, overall: u8| CategoryRating {
            id: None,
            model_number: 4,
            device_fingerprint: "device-1".to_string(),
            design_craftsmanship: design,
            historical_accuracy: 4,
            volunteer_explanation: 3,
            educational_value: 4,
            overall_experience: overall,
            rating_time: None,
        };
        let ranked = rank_models(&[exhibit(4)], &[row(5, 4), row(4, 5)]);
        assert_eq!(ranked[0].category_means, vec![4.5, 4.0, 3.0, 4.0, 4.5]);
        assert_eq!(ranked[0].composite, 4.0);
    }
}
