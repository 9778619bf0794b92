//! # Volunteers Service Module
//!
//! Routes under `/api/volunteers`. Listing is public; writes are admin only.
//! A volunteer created without a code gets the next `Vnnn` code.

mod delete;
mod list;
mod save;

use actix_web::Scope;
use actix_web::web::{delete, get, post, put, scope};
use common::model::volunteer::Volunteer;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::ApiError;

const API_PATH: &str = "/api/volunteers";

const COLUMNS: &str = "id, name, volunteer_code";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/{id}", put().to(save::update))
        .route("/{id}", delete().to(delete::process))
}

fn read_volunteer(row: &Row<'_>) -> rusqlite::Result<Volunteer> {
    Ok(Volunteer {
        id: row.get(0)?,
        name: row.get(1)?,
        volunteer_code: row.get(2)?,
    })
}

fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Volunteer>, ApiError> {
    let volunteer = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM volunteers WHERE id = ?1"),
            params![id],
            read_volunteer,
        )
        .optional()?;
    Ok(volunteer)
}
