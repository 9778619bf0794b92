use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use common::model::rating::{NewRating, Rating};
use log::info;
use rusqlite::{Connection, params};

use super::{COLUMNS, read_rating};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `POST /api/ratings`.
pub async fn process(state: web::Data<AppState>, payload: web::Json<NewRating>) -> Result<HttpResponse, ApiError> {
    let rating = NewRating::new(
        payload.user_id.trim(),
        payload.model_number,
        payload.star_rating,
        payload.comments.clone(),
    );
    rating.validate()?;

    let conn = state.db.connect()?;
    let stored = insert_rating(&conn, &rating, Utc::now())?;
    info!("Rating {} stars for model {} from {}", stored.star_rating, stored.model_number, stored.user_id);
    Ok(HttpResponse::Created().json(vec![stored]))
}

/// Stores one rating. The model must exist; a repeated
/// `(user_id, model_number)` pair is a conflict.
pub fn insert_rating(conn: &Connection, rating: &NewRating, at: DateTime<Utc>) -> Result<Rating, ApiError> {
    let known: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM models WHERE model_number = ?1)",
        params![rating.model_number],
        |row| row.get(0),
    )?;
    if !known {
        return Err(ApiError::NotFound("model"));
    }

    conn.execute(
        "INSERT INTO ratings (user_id, model_number, star_rating, comments, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![rating.user_id, rating.model_number, rating.star_rating, rating.comments, at],
    )
    .map_err(|e| match ApiError::from(e) {
        ApiError::Conflict(_) => ApiError::Conflict(format!(
            "model {} already rated by this visitor",
            rating.model_number
        )),
        other => other,
    })?;
    let stored = conn.query_row(
        &format!("SELECT {COLUMNS} FROM ratings WHERE id = ?1"),
        params![conn.last_insert_rowid()],
        read_rating,
    )?;
    Ok(stored)
}
