use actix_web::{HttpResponse, web};

use super::{COLUMNS, read_volunteer};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `GET /api/volunteers`.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let conn = state.db.connect()?;
    let volunteers = conn
        .prepare(&format!("SELECT {COLUMNS} FROM volunteers ORDER BY volunteer_code"))?
        .query_map([], read_volunteer)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(volunteers))
}
