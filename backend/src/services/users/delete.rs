use actix_web::{HttpRequest, HttpResponse, web};
use rusqlite::params;

use super::find_by_id;
use crate::AppState;
use crate::error::ApiError;

/// Handler for `DELETE /api/users/{id}`. The visitor's ratings are kept.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    let id = id.into_inner();

    let conn = state.db.connect()?;
    let user = find_by_id(&conn, id)?.ok_or(ApiError::NotFound("user"))?;
    conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    Ok(HttpResponse::Ok().json(vec![user]))
}
