//! Visitor registration with merge.
//!
//! A registration is matched to an existing record by phone number first and
//! by visitor identity second. A match counts as a repeat visit: the new group
//! size is added to `visitor_count`, `repeat_count` goes up by one, contact
//! details are overwritten, and the stored `user_id` is kept.
//!
//! When the stored `user_id` differs from the one submitted (same phone, new
//! browser), the submitted identity's ratings and feedback are moved onto the
//! stored identity in the same transaction. Ratings for models the stored
//! identity already rated stay where they are. The response names the
//! replaced identity in `merged_from` so the client can adopt the stored one.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use common::model::user::{Registration, RegistrationOutcome, UserRecord};
use log::info;
use rusqlite::{Connection, OptionalExtension, Transaction, params};

use super::{COLUMNS, read_user};
use crate::AppState;
use crate::error::ApiError;

/// Handler for `POST /api/users/register`.
pub async fn process(state: web::Data<AppState>, payload: web::Json<Registration>) -> Result<HttpResponse, ApiError> {
    let registration = payload.into_inner().normalized();
    registration.validate()?;

    let mut conn = state.db.connect()?;
    let outcome = register(&mut conn, &registration, Utc::now())?;
    Ok(HttpResponse::Ok().json(outcome))
}

pub fn register(
    conn: &mut Connection,
    registration: &Registration,
    now: DateTime<Utc>,
) -> Result<RegistrationOutcome, ApiError> {
    let tx = conn.transaction()?;

    let existing = match &registration.phone {
        Some(phone) => find_by(&tx, "phone", phone)?,
        None => None,
    };
    let existing = match existing {
        Some(user) => Some(user),
        None => find_by(&tx, "user_id", &registration.user_id)?,
    };

    let (user_id, merged_from) = match existing {
        Some(user) => {
            tx.execute(
                "UPDATE users SET
                    name = ?1,
                    place = ?2,
                    phone = COALESCE(?3, phone),
                    email = COALESCE(?4, email),
                    visitor_count = visitor_count + ?5,
                    repeat_count = repeat_count + 1,
                    updated_at = ?6
                 WHERE id = ?7",
                params![
                    registration.name,
                    registration.place,
                    registration.phone,
                    registration.email,
                    registration.visitor_count,
                    now,
                    user.id,
                ],
            )?;
            let merged_from = if user.user_id != registration.user_id {
                move_identity(&tx, &registration.user_id, &user.user_id)?;
                Some(registration.user_id.clone())
            } else {
                None
            };
            info!("Returning visitor {} (repeat {})", user.user_id, user.repeat_count + 1);
            (user.user_id, merged_from)
        }
        None => {
            tx.execute(
                "INSERT INTO users (user_id, name, place, phone, email, visitor_count, repeat_count, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)",
                params![
                    registration.user_id,
                    registration.name,
                    registration.place,
                    registration.phone,
                    registration.email,
                    registration.visitor_count,
                    now,
                ],
            )?;
            info!("Registered visitor {}", registration.user_id);
            (registration.user_id.clone(), None)
        }
    };

    let user = find_by(&tx, "user_id", &user_id)?.ok_or(ApiError::NotFound("user"))?;
    tx.commit()?;
    Ok(RegistrationOutcome { user, merged_from })
}

fn find_by(tx: &Transaction<'_>, column: &'static str, value: &str) -> Result<Option<UserRecord>, ApiError> {
    let user = tx
        .query_row(
            &format!("SELECT {COLUMNS} FROM users WHERE {column} = ?1 ORDER BY id LIMIT 1"),
            params![value],
            read_user,
        )
        .optional()?;
    Ok(user)
}

fn move_identity(tx: &Transaction<'_>, from: &str, to: &str) -> Result<(), ApiError> {
    let ratings = tx.execute(
        "UPDATE OR IGNORE ratings SET user_id = ?1 WHERE user_id = ?2",
        params![to, from],
    )?;
    tx.execute(
        "UPDATE OR IGNORE exhibition_feedback SET user_id = ?1 WHERE user_id = ?2",
        params![to, from],
    )?;
    info!("Merged identity {from} into {to}: {ratings} ratings moved");
    Ok(())
}
