//! Step-by-step feedback survey state.
//!
//! Steps: language choice (0), personal details (1), one step per question
//! (2..=6), final thoughts (7). Moving forward validates the current step;
//! moving back from personal details clears the chosen language.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::model::feedback::{Answer, FeedbackSubmission, Question};
use crate::model::language::Language;
use crate::model::user::{normalize_phone, validate_email, validate_phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Language,
    Personal,
    Question(Question),
    FinalThoughts,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackForm {
    pub language: Option<Language>,
    pub step: usize,
    pub name: String,
    pub place: String,
    pub mobile: String,
    pub email: String,
    pub profession: String,
    pub accompanying_count: String,
    pub answers: [Answer; 5],
    pub additional_comments: String,
}

impl FeedbackForm {
    /// Steps after the language choice.
    pub const TOTAL_STEPS: usize = Question::ALL.len() + 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Step {
        match self.step {
            0 => Step::Language,
            1 => Step::Personal,
            n if n < Self::TOTAL_STEPS => Step::Question(Question::ALL[n - 2]),
            _ => Step::FinalThoughts,
        }
    }

    pub fn language(&self) -> Language {
        self.language.unwrap_or_default()
    }

    pub fn choose_language(&mut self, language: Language) {
        self.language = Some(language);
        self.step = 1;
    }

    pub fn progress_percent(&self) -> f64 {
        (self.step + 1) as f64 / (Self::TOTAL_STEPS + 1) as f64 * 100.0
    }

    pub fn is_last_step(&self) -> bool {
        self.step >= Self::TOTAL_STEPS
    }

    pub fn answer(&self, question: Question) -> &Answer {
        &self.answers[Self::slot(question)]
    }

    pub fn select(&mut self, question: Question, option: usize) {
        self.answers[Self::slot(question)].selected = Some(option);
    }

    pub fn comment(&mut self, question: Question, comment: String) {
        self.answers[Self::slot(question)].comment = comment;
    }

    /// Validates the current step and advances.
    pub fn next(&mut self) -> Result<(), ValidationError> {
        match self.current() {
            Step::Language => {}
            Step::Personal => self.validate_personal()?,
            Step::Question(question) => self.validate_answer(question)?,
            Step::FinalThoughts => return Ok(()),
        }
        self.step += 1;
        Ok(())
    }

    pub fn previous(&mut self) {
        if self.step == 1 {
            self.language = None;
        }
        self.step = self.step.saturating_sub(1);
    }

    pub fn validate_personal(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.place.trim().is_empty() {
            return Err(ValidationError::Required("place"));
        }
        if self.profession.trim().is_empty() {
            return Err(ValidationError::Required("profession"));
        }
        self.parsed_count()?;
        if let Some(mobile) = normalize_phone(self.mobile.trim()) {
            validate_phone(&mobile)?;
        }
        if !self.email.trim().is_empty() {
            validate_email(self.email.trim())?;
        }
        Ok(())
    }

    fn validate_answer(&self, question: Question) -> Result<(), ValidationError> {
        match self.answer(question).selected {
            Some(index) if question.option_en(index).is_some() => Ok(()),
            _ => Err(ValidationError::MissingAnswer(question.prompt_en())),
        }
    }

    fn parsed_count(&self) -> Result<u32, ValidationError> {
        match self.accompanying_count.trim().parse::<u32>() {
            Ok(0) => Err(ValidationError::Count("accompanying count")),
            Ok(count) => Ok(count),
            Err(_) if self.accompanying_count.trim().is_empty() => {
                Err(ValidationError::Required("accompanying count"))
            }
            Err(_) => Err(ValidationError::Count("accompanying count")),
        }
    }

    /// Validates every step and produces the record to upsert.
    pub fn build(&self, user_id: &str, now: DateTime<Utc>) -> Result<FeedbackSubmission, ValidationError> {
        self.validate_personal()?;
        for question in Question::ALL {
            self.validate_answer(question)?;
        }

        let chosen = |question: Question| -> (String, String) {
            let answer = self.answer(question);
            let text = answer
                .selected
                .and_then(|i| question.option_en(i))
                .unwrap_or_default()
                .to_string();
            (text, answer.comment.trim().to_string())
        };
        let (overall_experience, overall_experience_comment) = chosen(Question::OverallExperience);
        let (organization, organization_comment) = chosen(Question::Organization);
        let (movement, movement_comment) = chosen(Question::Movement);
        let (learning, learning_comment) = chosen(Question::Learning);
        let (improvements, improvements_comment) = chosen(Question::Improvements);

        Ok(FeedbackSubmission {
            id: None,
            user_id: user_id.to_string(),
            name: self.name.trim().to_string(),
            place: self.place.trim().to_string(),
            mobile: normalize_phone(self.mobile.trim()),
            email: Some(self.email.trim().to_lowercase()).filter(|e| !e.is_empty()),
            accompanying_type: self.profession.trim().to_string(),
            accompanying_count: self.parsed_count()?,
            overall_experience,
            overall_experience_comment,
            organization,
            organization_comment,
            movement,
            movement_comment,
            learning,
            learning_comment,
            improvements,
            improvements_comment,
            additional_comments: self.additional_comments.trim().to_string(),
            submitted_at: now,
            submission_language: self.language(),
        })
    }

    fn slot(question: Question) -> usize {
        Question::ALL
            .iter()
            .position(|q| *q == question)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled() -> FeedbackForm {
        let mut form = FeedbackForm::new();
        form.choose_language(Language::Urdu);
        form.name = "Zainab".to_string();
        form.place = "Hubballi".to_string();
        form.profession = "Teacher".to_string();
        form.accompanying_count = "4".to_string();
        form
    }

    #[test]
    fn personal_step_blocks_until_required_fields_are_present() {
        let mut form = filled();
        form.profession.clear();
        assert_eq!(form.next(), Err(ValidationError::Required("profession")));
        assert_eq!(form.current(), Step::Personal);

        form.profession = "Teacher".to_string();
        form.accompanying_count = "0".to_string();
        assert_eq!(form.next(), Err(ValidationError::Count("accompanying count")));

        form.accompanying_count = "2".to_string();
        assert!(form.next().is_ok());
        assert_eq!(form.current(), Step::Question(Question::OverallExperience));
    }

    #[test]
    fn question_steps_require_a_selection() {
        let mut form = filled();
        form.next().unwrap();
        assert_eq!(
            form.next(),
            Err(ValidationError::MissingAnswer(Question::OverallExperience.prompt_en()))
        );
        form.select(Question::OverallExperience, 1);
        assert!(form.next().is_ok());
        assert_eq!(form.current(), Step::Question(Question::Organization));
    }

    #[test]
    fn walking_back_from_personal_details_clears_the_language() {
        let mut form = filled();
        form.previous();
        assert_eq!(form.current(), Step::Language);
        assert_eq!(form.language, None);
    }

    #[test]
    fn progress_counts_the_language_step() {
        let mut form = FeedbackForm::new();
        assert!((form.progress_percent() - 12.5).abs() < 1e-9);
        form.step = FeedbackForm::TOTAL_STEPS;
        assert!((form.progress_percent() - 100.0).abs() < 1e-9);
        assert_eq!(form.current(), Step::FinalThoughts);
    }

    #[test]
    fn build_stores_english_option_text_and_language() {
        let mut form = filled();
        for (i, q) in Question::ALL.into_iter().enumerate() {
            form.select(q, i);
        }
        form.comment(Question::Learning, "  more dates please ".to_string());
        let at = Utc.with_ymd_and_hms(2025, 11, 2, 6, 0, 0).unwrap();

        let submission = form.build("abc123", at).unwrap();
        assert_eq!(submission.user_id, "abc123");
        assert_eq!(submission.overall_experience, Question::OverallExperience.options_en()[0]);
        assert_eq!(submission.improvements, Question::Improvements.options_en()[4]);
        assert_eq!(submission.learning_comment, "more dates please");
        assert_eq!(submission.accompanying_count, 4);
        assert_eq!(submission.submission_language, Language::Urdu);
        assert_eq!(submission.mobile, None);
    }
}
