use actix_web::{HttpRequest, HttpResponse, web};
use log::info;
use rusqlite::params;

use super::find_by_id;
use crate::AppState;
use crate::error::ApiError;

/// Handler for `DELETE /api/models/{id}`. Ratings for the model are kept.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    let id = id.into_inner();

    let conn = state.db.connect()?;
    let exhibit = find_by_id(&conn, id)?.ok_or(ApiError::NotFound("model"))?;
    conn.execute("DELETE FROM models WHERE id = ?1", params![id])?;
    info!("Deleted model {}", exhibit.model_number);
    Ok(HttpResponse::Ok().json(vec![exhibit]))
}
