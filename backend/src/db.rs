//! SQLite storage for the five collections.
//!
//! A connection is opened per request from the configured path. The schema
//! is created at startup; `UNIQUE(user_id, model_number)` on `ratings` is what
//! makes rating submission idempotent across browsers.

use std::path::{Path, PathBuf};

use log::info;
use rusqlite::Connection;

use crate::error::ApiError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS models (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_number INTEGER NOT NULL UNIQUE CHECK (model_number > 0),
    name_en TEXT NOT NULL,
    name_ur TEXT NOT NULL DEFAULT '',
    name_kn TEXT NOT NULL DEFAULT '',
    description_en TEXT NOT NULL DEFAULT '',
    description_ur TEXT NOT NULL DEFAULT '',
    description_kn TEXT NOT NULL DEFAULT '',
    location TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    model_number INTEGER NOT NULL,
    star_rating INTEGER NOT NULL CHECK (star_rating BETWEEN 1 AND 5),
    comments TEXT,
    created_at TEXT NOT NULL,
    UNIQUE (user_id, model_number)
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    place TEXT NOT NULL,
    phone TEXT,
    email TEXT,
    visitor_count INTEGER NOT NULL DEFAULT 1,
    repeat_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS users_phone ON users (phone);

CREATE TABLE IF NOT EXISTS volunteers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    volunteer_code TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS exhibition_feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    place TEXT NOT NULL,
    mobile TEXT,
    email TEXT,
    accompanying_type TEXT NOT NULL,
    accompanying_count INTEGER NOT NULL,
    overall_experience TEXT NOT NULL,
    overall_experience_comment TEXT NOT NULL DEFAULT '',
    organization TEXT NOT NULL,
    organization_comment TEXT NOT NULL DEFAULT '',
    movement TEXT NOT NULL,
    movement_comment TEXT NOT NULL DEFAULT '',
    learning TEXT NOT NULL,
    learning_comment TEXT NOT NULL DEFAULT '',
    improvements TEXT NOT NULL,
    improvements_comment TEXT NOT NULL DEFAULT '',
    additional_comments TEXT NOT NULL DEFAULT '',
    submitted_at TEXT NOT NULL,
    submission_language TEXT NOT NULL
);
";

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> Result<Connection, ApiError> {
        let conn = Connection::open(&self.path)
            .map_err(|e| ApiError::Unavailable(format!("{}: {e}", self.path.display())))?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Creates missing tables and switches the file to WAL mode.
    pub fn migrate(&self) -> Result<(), ApiError> {
        let conn = self.connect()?;
        let mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.execute_batch(SCHEMA)?;
        info!("Database ready at {} (journal mode {mode})", self.path.display());
        Ok(())
    }
}
