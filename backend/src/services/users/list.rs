use actix_web::{HttpRequest, HttpResponse, web};

use super::{COLUMNS, read_user};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `GET /api/users`.
pub async fn process(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    state.sessions.authorize(&req).await?;
    let conn = state.db.connect()?;
    let users = conn
        .prepare(&format!("SELECT {COLUMNS} FROM users ORDER BY id"))?
        .query_map([], read_user)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(users))
}
