use actix_web::{HttpRequest, HttpResponse, web};
use common::model::user::{UserChanges, normalize_phone, validate_email, validate_phone};
use chrono::Utc;
use rusqlite::params;

use super::find_by_id;
use crate::AppState;
use crate::error::ApiError;

/// Handler for `PUT /api/users/{id}`.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<UserChanges>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    let id = id.into_inner();
    let changes = payload.into_inner();

    let phone = changes.phone.as_deref().and_then(|p| normalize_phone(p.trim()));
    if let Some(phone) = &phone {
        validate_phone(phone)?;
    }
    let email = changes
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    if let Some(email) = &email {
        validate_email(email)?;
    }
    if changes.visitor_count == Some(0) {
        return Err(ApiError::BadRequest("visitor count must be at least 1".to_string()));
    }

    let conn = state.db.connect()?;
    let updated = conn.execute(
        "UPDATE users SET
            name = COALESCE(?1, name),
            place = COALESCE(?2, place),
            phone = COALESCE(?3, phone),
            email = COALESCE(?4, email),
            visitor_count = COALESCE(?5, visitor_count),
            updated_at = ?6
         WHERE id = ?7",
        params![
            changes.name.as_deref().map(str::trim).filter(|n| !n.is_empty()),
            changes.place.as_deref().map(str::trim).filter(|p| !p.is_empty()),
            phone,
            email,
            changes.visitor_count,
            Utc::now(),
            id,
        ],
    )?;
    if updated == 0 {
        return Err(ApiError::NotFound("user"));
    }
    let user = find_by_id(&conn, id)?.ok_or(ApiError::NotFound("user"))?;
    Ok(HttpResponse::Ok().json(vec![user]))
}
