//! # Admin Service Module
//!
//! Sign-in for the admin panel under `/api/admin`.
//!
//! - `POST /login`: exchanges email and password for a bearer token.
//! - `POST /logout`: closes the session named by the bearer token.
//! - `POST /password`: changes the admin password (must match its
//!   confirmation and be at least six characters).

mod login;
mod logout;
mod password;

use actix_web::Scope;
use actix_web::web::{post, scope};

const API_PATH: &str = "/api/admin";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::process))
        .route("/logout", post().to(logout::process))
        .route("/password", post().to(password::process))
}
