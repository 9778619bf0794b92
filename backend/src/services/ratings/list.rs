use actix_web::{HttpResponse, web};
use common::model::rating::Rating;
use common::requests::RatingQuery;
use rusqlite::{Connection, params};

use super::{COLUMNS, read_rating};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `GET /api/ratings[?user_id=]`.
pub async fn process(state: web::Data<AppState>, query: web::Query<RatingQuery>) -> Result<HttpResponse, ApiError> {
    let conn = state.db.connect()?;
    let user_id = query.user_id.as_deref().map(str::trim).filter(|u| !u.is_empty());
    Ok(HttpResponse::Ok().json(list_ratings(&conn, user_id)?))
}

pub fn list_ratings(conn: &Connection, user_id: Option<&str>) -> Result<Vec<Rating>, ApiError> {
    let ratings = match user_id {
        Some(user_id) => conn
            .prepare(&format!("SELECT {COLUMNS} FROM ratings WHERE user_id = ?1 ORDER BY id"))?
            .query_map(params![user_id], read_rating)?
            .collect::<Result<Vec<_>, _>>()?,
        None => conn
            .prepare(&format!("SELECT {COLUMNS} FROM ratings ORDER BY id"))?
            .query_map([], read_rating)?
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(ratings)
}
