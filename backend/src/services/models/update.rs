use actix_web::{HttpRequest, HttpResponse, web};
use common::model::exhibit::{Exhibit, ExhibitChanges};
use rusqlite::{Connection, params};

use super::find_by_id;
use crate::AppState;
use crate::error::ApiError;

/// Handler for `PUT /api/models/{id}`.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<ExhibitChanges>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    payload.validate()?;

    let conn = state.db.connect()?;
    let exhibit = update_model(&conn, id.into_inner(), &payload)?;
    Ok(HttpResponse::Ok().json(vec![exhibit]))
}

/// Applies the fields present in `changes`; absent fields keep their value.
pub fn update_model(conn: &Connection, id: i64, changes: &ExhibitChanges) -> Result<Exhibit, ApiError> {
    let trimmed = |v: &Option<String>| v.as_deref().map(str::trim).map(str::to_string);
    let updated = conn.execute(
        "UPDATE models SET
            model_number = COALESCE(?1, model_number),
            name_en = COALESCE(?2, name_en),
            name_ur = COALESCE(?3, name_ur),
            name_kn = COALESCE(?4, name_kn),
            description_en = COALESCE(?5, description_en),
            description_ur = COALESCE(?6, description_ur),
            description_kn = COALESCE(?7, description_kn),
            location = COALESCE(?8, location)
         WHERE id = ?9",
        params![
            changes.model_number,
            trimmed(&changes.name_en),
            trimmed(&changes.name_ur),
            trimmed(&changes.name_kn),
            trimmed(&changes.description_en),
            trimmed(&changes.description_ur),
            trimmed(&changes.description_kn),
            trimmed(&changes.location),
            id,
        ],
    )?;
    if updated == 0 {
        return Err(ApiError::NotFound("model"));
    }
    find_by_id(conn, id)?.ok_or(ApiError::NotFound("model"))
}
