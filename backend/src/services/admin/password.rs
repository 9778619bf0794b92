use actix_web::{HttpRequest, HttpResponse, web};
use common::requests::PasswordChange;

use crate::AppState;
use crate::error::ApiError;

/// Handler for `POST /api/admin/password`.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<PasswordChange>,
) -> Result<HttpResponse, ApiError> {
    let (token, _) = state.sessions.authorize(&req).await?;
    state.sessions.change_password(&token, &payload).await?;
    Ok(HttpResponse::NoContent().finish())
}
