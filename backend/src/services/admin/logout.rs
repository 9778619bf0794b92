use actix_web::{HttpRequest, HttpResponse, web};
use log::info;

use crate::AppState;
use crate::error::ApiError;

/// Handler for `POST /api/admin/logout`.
pub async fn process(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let (token, session) = state.sessions.authorize(&req).await?;
    state.sessions.logout(&token).await;
    info!("Admin {} signed out", session.email);
    Ok(HttpResponse::NoContent().finish())
}
