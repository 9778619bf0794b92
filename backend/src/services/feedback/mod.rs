//! # Feedback Service Module
//!
//! Routes under `/api/feedback`. One survey per visitor identity: posting
//! again replaces the earlier answers.

mod list;
mod upsert;

use actix_web::Scope;
use actix_web::web::{get, post, scope};
use common::model::feedback::FeedbackSubmission;
use common::model::language::Language;
use rusqlite::Row;

const API_PATH: &str = "/api/feedback";

const COLUMNS: &str = "id, user_id, name, place, mobile, email, accompanying_type, accompanying_count,
    overall_experience, overall_experience_comment, organization, organization_comment,
    movement, movement_comment, learning, learning_comment, improvements, improvements_comment,
    additional_comments, submitted_at, submission_language";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(upsert::process))
}

fn read_feedback(row: &Row<'_>) -> rusqlite::Result<FeedbackSubmission> {
    let language: String = row.get(20)?;
    Ok(FeedbackSubmission {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        place: row.get(3)?,
        mobile: row.get(4)?,
        email: row.get(5)?,
        accompanying_type: row.get(6)?,
        accompanying_count: row.get(7)?,
        overall_experience: row.get(8)?,
        overall_experience_comment: row.get(9)?,
        organization: row.get(10)?,
        organization_comment: row.get(11)?,
        movement: row.get(12)?,
        movement_comment: row.get(13)?,
        learning: row.get(14)?,
        learning_comment: row.get(15)?,
        improvements: row.get(16)?,
        improvements_comment: row.get(17)?,
        additional_comments: row.get(18)?,
        submitted_at: row.get(19)?,
        submission_language: Language::from_code(&language).unwrap_or_default(),
    })
}
