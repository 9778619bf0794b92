use actix_web::{HttpResponse, web};
use common::model::feedback::FeedbackSubmission;
use log::info;
use rusqlite::{Connection, params};

use super::{COLUMNS, read_feedback};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `POST /api/feedback`.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<FeedbackSubmission>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    let conn = state.db.connect()?;
    let stored = upsert_feedback(&conn, &payload)?;
    info!("Feedback stored for {}", stored.user_id);
    Ok(HttpResponse::Ok().json(vec![stored]))
}

pub fn upsert_feedback(conn: &Connection, f: &FeedbackSubmission) -> Result<FeedbackSubmission, ApiError> {
    conn.execute(
        "INSERT INTO exhibition_feedback (
            user_id, name, place, mobile, email, accompanying_type, accompanying_count,
            overall_experience, overall_experience_comment, organization, organization_comment,
            movement, movement_comment, learning, learning_comment, improvements, improvements_comment,
            additional_comments, submitted_at, submission_language
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
         ON CONFLICT (user_id) DO UPDATE SET
            name = excluded.name,
            place = excluded.place,
            mobile = excluded.mobile,
            email = excluded.email,
            accompanying_type = excluded.accompanying_type,
            accompanying_count = excluded.accompanying_count,
            overall_experience = excluded.overall_experience,
            overall_experience_comment = excluded.overall_experience_comment,
            organization = excluded.organization,
            organization_comment = excluded.organization_comment,
            movement = excluded.movement,
            movement_comment = excluded.movement_comment,
            learning = excluded.learning,
            learning_comment = excluded.learning_comment,
            improvements = excluded.improvements,
            improvements_comment = excluded.improvements_comment,
            additional_comments = excluded.additional_comments,
            submitted_at = excluded.submitted_at,
            submission_language = excluded.submission_language",
        params![
            f.user_id.trim(),
            f.name.trim(),
            f.place.trim(),
            f.mobile,
            f.email,
            f.accompanying_type.trim(),
            f.accompanying_count,
            f.overall_experience,
            f.overall_experience_comment,
            f.organization,
            f.organization_comment,
            f.movement,
            f.movement_comment,
            f.learning,
            f.learning_comment,
            f.improvements,
            f.improvements_comment,
            f.additional_comments,
            f.submitted_at,
            f.submission_language.code(),
        ],
    )?;
    let stored = conn.query_row(
        &format!("SELECT {COLUMNS} FROM exhibition_feedback WHERE user_id = ?1"),
        params![f.user_id.trim()],
        read_feedback,
    )?;
    Ok(stored)
}
