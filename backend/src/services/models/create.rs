use actix_web::{HttpRequest, HttpResponse, web};
use common::model::exhibit::{Exhibit, ExhibitDraft};
use log::info;
use rusqlite::{Connection, params};

use super::find_by_id;
use crate::AppState;
use crate::error::ApiError;

/// Handler for `POST /api/models`.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<ExhibitDraft>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    payload.validate()?;

    let conn = state.db.connect()?;
    let exhibit = insert_model(&conn, &payload)?;
    info!("Created model {} ({})", exhibit.model_number, exhibit.name_en);
    Ok(HttpResponse::Created().json(vec![exhibit]))
}

pub fn insert_model(conn: &Connection, draft: &ExhibitDraft) -> Result<Exhibit, ApiError> {
    conn.execute(
        "INSERT INTO models (model_number, name_en, name_ur, name_kn, description_en, description_ur, description_kn, location)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            draft.model_number,
            draft.name_en.trim(),
            draft.name_ur.trim(),
            draft.name_kn.trim(),
            draft.description_en.trim(),
            draft.description_ur.trim(),
            draft.description_kn.trim(),
            draft.location.trim(),
        ],
    )
    .map_err(|e| match ApiError::from(e) {
        ApiError::Conflict(_) => ApiError::Conflict(format!("model number {} already exists", draft.model_number)),
        other => other,
    })?;
    find_by_id(conn, conn.last_insert_rowid())?.ok_or(ApiError::NotFound("model"))
}
