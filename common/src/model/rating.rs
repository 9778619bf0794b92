use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

pub fn validate_star_rating(stars: u8) -> Result<(), ValidationError> {
    if (MIN_STARS..=MAX_STARS).contains(&stars) {
        Ok(())
    } else {
        Err(ValidationError::StarRating(stars))
    }
}

/// A stored rating. The service enforces one row per `(user_id, model_number)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: String,
    pub model_number: u32,
    pub star_rating: u8,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Rating as submitted by a visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRating {
    pub user_id: String,
    pub model_number: u32,
    pub star_rating: u8,
    #[serde(default)]
    pub comments: Option<String>,
}

impl NewRating {
    /// Builds a submission, turning blank comments into `None`.
    pub fn new(user_id: impl Into<String>, model_number: u32, star_rating: u8, comments: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            model_number,
            star_rating,
            comments: comments
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::Required("user_id"));
        }
        if self.model_number == 0 {
            return Err(ValidationError::ModelNumber);
        }
        validate_star_rating(self.star_rating)
    }

    /// Local stand-in used when the store has not echoed the row back yet.
    pub fn to_rating(&self) -> Rating {
        Rating {
            id: None,
            user_id: self.user_id.clone(),
            model_number: self.model_number,
            star_rating: self.star_rating,
            comments: self.comments.clone(),
            created_at: None,
        }
    }
}

/// Five-category rating from the first exhibition season, keyed by device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRating {
    #[serde(default)]
    pub id: Option<String>,
    pub model_number: u32,
    pub device_fingerprint: String,
    pub design_craftsmanship: u8,
    pub historical_accuracy: u8,
    pub volunteer_explanation: u8,
    pub educational_value: u8,
    pub overall_experience: u8,
    #[serde(default)]
    pub rating_time: Option<DateTime<Utc>>,
}

impl CategoryRating {
    pub const CATEGORY_LABELS: [&'static str; 5] = [
        "Design & craftsmanship",
        "Historical accuracy",
        "Volunteer explanation",
        "Educational value",
        "Overall experience",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_outside_one_to_five_are_rejected() {
        assert!(validate_star_rating(1).is_ok());
        assert!(validate_star_rating(5).is_ok());
        assert_eq!(validate_star_rating(0), Err(ValidationError::StarRating(0)));
        assert_eq!(validate_star_rating(6), Err(ValidationError::StarRating(6)));
    }

    #[test]
    fn blank_comments_are_dropped() {
        let r = NewRating::new("abc", 2, 4, Some("   ".to_string()));
        assert_eq!(r.comments, None);
        let r = NewRating::new("abc", 2, 4, Some(" lovely ".to_string()));
        assert_eq!(r.comments.as_deref(), Some("lovely"));
    }

    #[test]
    fn submissions_need_a_visitor_and_a_model() {
        assert_eq!(
            NewRating::new("", 2, 4, None).validate(),
            Err(ValidationError::Required("user_id"))
        );
        assert_eq!(
            NewRating::new("abc", 0, 4, None).validate(),
            Err(ValidationError::ModelNumber)
        );
    }
}
