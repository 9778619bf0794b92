//! Exhibition service: JSON endpoints over SQLite for models, ratings,
//! users, volunteers and feedback, plus admin sign-in.

pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod session_controller;

use actix_web::web;

use crate::db::Database;
use crate::session_controller::state::SessionsState;

/// Shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionsState,
}

/// Registers every API scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(services::models::configure_routes())
        .service(services::ratings::configure_routes())
        .service(services::users::configure_routes())
        .service(services::volunteers::configure_routes())
        .service(services::feedback::configure_routes())
        .service(services::admin::configure_routes());
}
