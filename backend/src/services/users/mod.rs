//! # Users Service Module
//!
//! Visitor registrations under `/api/users`.
//!
//! - `POST /register`: public. Matches an existing record by phone, then by
//!   visitor identity, and merges into it (see `register`).
//! - `GET ""`, `PUT /{id}`, `DELETE /{id}`: admin only.

mod delete;
mod list;
mod register;
mod update;

use actix_web::Scope;
use actix_web::web::{delete, get, post, put, scope};
use common::model::user::UserRecord;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::ApiError;

const API_PATH: &str = "/api/users";

const COLUMNS: &str = "id, user_id, name, place, phone, email, visitor_count, repeat_count";

pub use register::register;

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/register", post().to(register::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete::process))
}

fn read_user(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        place: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        visitor_count: row.get(6)?,
        repeat_count: row.get(7)?,
    })
}

fn find_by_id(conn: &Connection, id: i64) -> Result<Option<UserRecord>, ApiError> {
    let user = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            read_user,
        )
        .optional()?;
    Ok(user)
}
