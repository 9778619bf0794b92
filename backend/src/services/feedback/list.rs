use actix_web::{HttpRequest, HttpResponse, web};

use super::{COLUMNS, read_feedback};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `GET /api/feedback`, newest first.
pub async fn process(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    let conn = state.db.connect()?;
    let feedback = conn
        .prepare(&format!("SELECT {COLUMNS} FROM exhibition_feedback ORDER BY submitted_at DESC"))?
        .query_map([], read_feedback)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(feedback))
}
