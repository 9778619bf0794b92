use actix_web::{HttpResponse, web};
use common::requests::{LoginRequest, LoginResponse};

use crate::AppState;
use crate::error::ApiError;

/// Handler for `POST /api/admin/login`.
pub async fn process(state: web::Data<AppState>, payload: web::Json<LoginRequest>) -> Result<HttpResponse, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("email and password are required".to_string()));
    }
    let token = state.sessions.login(&payload).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        email: payload.email.trim().to_string(),
    }))
}
