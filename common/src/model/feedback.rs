//! Exhibition feedback survey.
//!
//! The survey has five fixed questions, each with five options ordered from
//! most to least positive. Answers are stored as the English option text so
//! reports read the same whatever language the visitor chose; the language is
//! kept in `submission_language`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::language::Language;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    OverallExperience,
    Organization,
    Movement,
    Learning,
    Improvements,
}

pub const OPTIONS_PER_QUESTION: usize = 5;

impl Question {
    pub const ALL: [Question; 5] = [
        Question::OverallExperience,
        Question::Organization,
        Question::Movement,
        Question::Learning,
        Question::Improvements,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Question::OverallExperience => "overall_experience",
            Question::Organization => "organization",
            Question::Movement => "movement",
            Question::Learning => "learning",
            Question::Improvements => "improvements",
        }
    }

    pub fn prompt_en(self) -> &'static str {
        match self {
            Question::OverallExperience => "Describe your overall experience",
            Question::Organization => "How well was the exhibition organized and presented?",
            Question::Movement => "How easy was it to move around and view all the models?",
            Question::Learning => "What new things did you learn from this exhibition?",
            Question::Improvements => "What do you think could be improved for future exhibitions?",
        }
    }

    pub fn options_en(self) -> [&'static str; OPTIONS_PER_QUESTION] {
        match self {
            Question::OverallExperience => [
                "Extremely inspiring and unforgettable",
                "Very good, touched my heart and increased my love for the Prophet ﷺ",
                "Good, I liked it and learned something new",
                "Average, it was nice but could be more engaging",
                "Okay, I expected a bit more",
            ],
            Question::Organization => [
                "Very well organized, everything was clear and easy to follow",
                "Well organized, only minor delays or confusion",
                "Fairly organized, a few things could be improved",
                "Somewhat disorganized, I faced a few difficulties",
                "Not organized well, it was confusing at times",
            ],
            Question::Movement => [
                "Very easy to move and view all models comfortably",
                "Easy, only a few areas were slightly crowded",
                "Manageable, I could move around but not freely everywhere",
                "A bit difficult, too many people or narrow space",
                "Hard to move, I couldn't see some models properly",
            ],
            Question::Learning => [
                "Learned many new things about the Prophet's ﷺ life and message",
                "Learned a few new lessons and reminders",
                "Mostly revised what I already knew",
                "Learned little new, presentation was more visual than informative",
                "Did not learn much new, but it was spiritually refreshing",
            ],
            Question::Improvements => [
                "Add more explanation boards or short summaries near each model",
                "Use short videos or audio for storytelling",
                "Provide more space and better visitor flow",
                "Add activities or quiz corners for children",
                "Everything was excellent, no changes needed",
            ],
        }
    }

    pub fn option_en(self, index: usize) -> Option<&'static str> {
        self.options_en().get(index).copied()
    }
}

/// One answered question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub selected: Option<usize>,
    #[serde(default)]
    pub comment: String,
}

/// Stored feedback row, one per visitor identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: String,
    pub name: String,
    pub place: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-text profession of the visitor.
    pub accompanying_type: String,
    pub accompanying_count: u32,
    pub overall_experience: String,
    #[serde(default)]
    pub overall_experience_comment: String,
    pub organization: String,
    #[serde(default)]
    pub organization_comment: String,
    pub movement: String,
    #[serde(default)]
    pub movement_comment: String,
    pub learning: String,
    #[serde(default)]
    pub learning_comment: String,
    pub improvements: String,
    #[serde(default)]
    pub improvements_comment: String,
    #[serde(default)]
    pub additional_comments: String,
    pub submitted_at: DateTime<Utc>,
    pub submission_language: Language,
}

impl FeedbackSubmission {
    /// Selected option and comment for `question`.
    pub fn answer(&self, question: Question) -> (&str, &str) {
        match question {
            Question::OverallExperience => (&self.overall_experience, &self.overall_experience_comment),
            Question::Organization => (&self.organization, &self.organization_comment),
            Question::Movement => (&self.movement, &self.movement_comment),
            Question::Learning => (&self.learning, &self.learning_comment),
            Question::Improvements => (&self.improvements, &self.improvements_comment),
        }
    }

    /// Checks the record as the service receives it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::Required("user_id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.place.trim().is_empty() {
            return Err(ValidationError::Required("place"));
        }
        if self.accompanying_type.trim().is_empty() {
            return Err(ValidationError::Required("profession"));
        }
        if self.accompanying_count == 0 {
            return Err(ValidationError::Count("accompanying count"));
        }
        for question in Question::ALL {
            let (answer, _) = self.answer(question);
            if !question.options_en().iter().any(|option| *option == answer) {
                return Err(ValidationError::MissingAnswer(question.prompt_en()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_question_has_five_distinct_options() {
        for q in Question::ALL {
            let options = q.options_en();
            for (i, a) in options.iter().enumerate() {
                assert!(!a.is_empty());
                assert!(options[i + 1..].iter().all(|b| b != a), "{:?}", q);
            }
        }
        assert_eq!(Question::Movement.option_en(5), None);
    }

    #[test]
    fn language_is_stored_as_code() {
        let json = serde_json::to_string(&Language::Kannada).unwrap();
        assert_eq!(json, "\"kn\"");
    }
}
