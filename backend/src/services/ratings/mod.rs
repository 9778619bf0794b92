//! # Ratings Service Module
//!
//! Routes under `/api/ratings`.
//!
//! - `GET ""`: every rating, or one visitor's with `?user_id=`. Public.
//! - `POST ""`: stores a star rating. Out-of-range stars are a 400, a second
//!   rating for the same visitor and model a 409.
//! - `DELETE /{id}`: admin only.

mod create;
mod delete;
mod list;

use actix_web::Scope;
use actix_web::web::{delete, get, post, scope};
use common::model::rating::Rating;
use rusqlite::Row;

const API_PATH: &str = "/api/ratings";

const COLUMNS: &str = "id, user_id, model_number, star_rating, comments, created_at";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", delete().to(delete::process))
}

fn read_rating(row: &Row<'_>) -> rusqlite::Result<Rating> {
    Ok(Rating {
        id: row.get(0)?,
        user_id: row.get(1)?,
        model_number: row.get(2)?,
        star_rating: row.get(3)?,
        comments: row.get(4)?,
        created_at: row.get(5)?,
    })
}
