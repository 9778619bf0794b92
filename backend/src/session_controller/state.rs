//! Tracks signed-in administrators.
//!
//! Admin endpoints (model, volunteer and user management, feedback listing)
//! require a bearer token obtained from `POST /api/admin/login`. This module
//! holds the pieces behind that check:
//! - `SessionsState`: a clonable, thread-safe struct holding the live sessions
//!   and the admin credentials. It is injected into the Actix application
//!   state in `main.rs`.
//! - `Session`: what is remembered about one login.
//!
//! Sessions live in memory only; restarting the service signs everyone out.

use std::{collections::HashMap, sync::Arc};

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;
use chrono::{DateTime, Utc};
use common::requests::{LoginRequest, PasswordChange};
use log::{info, warn};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;

/// One signed-in administrator.
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Credentials {
    email: String,
    password: String,
}

/// A thread-safe, shareable container for admin sessions.
#[derive(Clone)]
pub struct SessionsState {
    /// A map from bearer token to the session it opened.
    ///
    /// Protected by an `Arc<RwLock>` so every worker checks tokens against
    /// the same map; only login and logout take the write lock.
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,

    /// The single admin account. The password can be changed at runtime;
    /// the change lasts until the service restarts.
    credentials: Arc<RwLock<Credentials>>,
}

impl SessionsState {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            credentials: Arc::new(RwLock::new(Credentials {
                email: email.into(),
                password: password.into(),
            })),
        }
    }

    /// Checks the credentials and opens a session, returning its token.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let credentials = self.credentials.read().await;
        let email_matches = credentials.email.eq_ignore_ascii_case(request.email.trim());
        if !email_matches || credentials.password != request.password {
            warn!("Rejected admin login for {}", request.email.trim());
            return Err(ApiError::Unauthorized);
        }

        let token = Uuid::new_v4().to_string();
        let session = Session {
            email: credentials.email.clone(),
            started_at: Utc::now(),
        };
        drop(credentials);
        self.sessions.write().await.insert(token.clone(), session);
        info!("Admin {} signed in", request.email.trim());
        Ok(token)
    }

    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Resolves the session named by the request's `Authorization: Bearer` header.
    pub async fn authorize(&self, req: &HttpRequest) -> Result<(String, Session), ApiError> {
        let token = bearer_token(req).ok_or(ApiError::Unauthorized)?;
        let sessions = self.sessions.read().await;
        match sessions.get(token) {
            Some(session) => Ok((token.to_string(), session.clone())),
            None => Err(ApiError::Unauthorized),
        }
    }

    /// Replaces the admin password and closes every other session.
    pub async fn change_password(&self, current_token: &str, change: &PasswordChange) -> Result<(), ApiError> {
        change.validate()?;
        self.credentials.write().await.password = change.new_password.clone();
        self.sessions
            .write()
            .await
            .retain(|token, _| token == current_token);
        info!("Admin password changed; other sessions closed");
        Ok(())
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
