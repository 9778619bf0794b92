//! # Models Service Module
//!
//! Routes under `/api/models` for the exhibit records shown to visitors.
//!
//! ## Sub-modules:
//! - `list`: every model, ordered by `model_number`. Public.
//! - `create`: inserts a model. Admin only; a duplicate `model_number` is a 409.
//! - `update`: partial update by row id. Admin only.
//! - `delete`: removes a model by row id. Admin only.
//!
//! Write endpoints answer with the affected rows as a JSON array.

mod create;
mod delete;
mod list;
mod update;

use actix_web::Scope;
use actix_web::web::{delete, get, post, put, scope};
use common::model::exhibit::Exhibit;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::ApiError;

/// The base path for all model-related API endpoints.
const API_PATH: &str = "/api/models";

const COLUMNS: &str = "id, model_number, name_en, name_ur, name_kn, description_en, description_ur, description_kn, location";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete::process))
}

fn read_exhibit(row: &Row<'_>) -> rusqlite::Result<Exhibit> {
    Ok(Exhibit {
        id: row.get(0)?,
        model_number: row.get(1)?,
        name_en: row.get(2)?,
        name_ur: row.get(3)?,
        name_kn: row.get(4)?,
        description_en: row.get(5)?,
        description_ur: row.get(6)?,
        description_kn: row.get(7)?,
        location: row.get(8)?,
        visited: 0,
        rating_submitted: false,
    })
}

fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Exhibit>, ApiError> {
    let exhibit = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM models WHERE id = ?1"),
            params![id],
            read_exhibit,
        )
        .optional()?;
    Ok(exhibit)
}
