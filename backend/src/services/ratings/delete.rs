use actix_web::{HttpRequest, HttpResponse, web};
use rusqlite::{OptionalExtension, params};

use super::{COLUMNS, read_rating};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `DELETE /api/ratings/{id}`.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    let id = id.into_inner();

    let conn = state.db.connect()?;
    let rating = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM ratings WHERE id = ?1"),
            params![id],
            read_rating,
        )
        .optional()?
        .ok_or(ApiError::NotFound("rating"))?;
    conn.execute("DELETE FROM ratings WHERE id = ?1", params![id])?;
    Ok(HttpResponse::Ok().json(vec![rating]))
}
