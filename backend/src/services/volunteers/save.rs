use actix_web::{HttpRequest, HttpResponse, web};
use common::model::volunteer::{VolunteerDraft, volunteer_code};
use rusqlite::{Connection, params};

use super::find_by_id;
use crate::AppState;
use crate::error::ApiError;

/// Handler for `POST /api/volunteers`.
pub async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<VolunteerDraft>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    let conn = state.db.connect()?;
    let draft = with_code(&conn, payload.into_inner())?;
    draft.validate()?;

    conn.execute(
        "INSERT INTO volunteers (name, volunteer_code) VALUES (?1, ?2)",
        params![draft.name.trim(), draft.volunteer_code.trim()],
    )?;
    let volunteer = find_by_id(&conn, conn.last_insert_rowid())?.ok_or(ApiError::NotFound("volunteer"))?;
    Ok(HttpResponse::Created().json(vec![volunteer]))
}

/// Handler for `PUT /api/volunteers/{id}`.
pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<VolunteerDraft>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    payload.validate()?;
    let id = id.into_inner();

    let conn = state.db.connect()?;
    let updated = conn.execute(
        "UPDATE volunteers SET name = ?1, volunteer_code = ?2 WHERE id = ?3",
        params![payload.name.trim(), payload.volunteer_code.trim(), id],
    )?;
    if updated == 0 {
        return Err(ApiError::NotFound("volunteer"));
    }
    let volunteer = find_by_id(&conn, id)?.ok_or(ApiError::NotFound("volunteer"))?;
    Ok(HttpResponse::Ok().json(vec![volunteer]))
}

fn with_code(conn: &Connection, mut draft: VolunteerDraft) -> Result<VolunteerDraft, ApiError> {
    if draft.volunteer_code.trim().is_empty() {
        let next: u32 = conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM volunteers", [], |row| row.get(0))?;
        draft.volunteer_code = volunteer_code(next);
    }
    Ok(draft)
}
