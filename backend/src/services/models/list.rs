use actix_web::{HttpResponse, web};
use common::model::exhibit::Exhibit;
use rusqlite::Connection;

use super::{COLUMNS, read_exhibit};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `GET /api/models`.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let conn = state.db.connect()?;
    Ok(HttpResponse::Ok().json(list_models(&conn)?))
}

pub fn list_models(conn: &Connection) -> Result<Vec<Exhibit>, ApiError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM models ORDER BY model_number"))?;
    let exhibits = stmt
        .query_map([], read_exhibit)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(exhibits)
}
