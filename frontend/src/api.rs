//! HTTP client for the exhibition service.
//!
//! `HttpGateway` implements the gateway traits the core logic is written
//! against, plus the admin calls used by the panel. Non-2xx answers are
//! turned into `GatewayError` through the status code, so a 409 from
//! `POST /api/ratings` surfaces as `GatewayError::Conflict`.

use common::error::GatewayError;
use common::gateway::{ExhibitSource, RatingGateway, RatingSource};
use common::model::exhibit::{Exhibit, ExhibitChanges, ExhibitDraft};
use common::model::feedback::FeedbackSubmission;
use common::model::rating::{NewRating, Rating};
use common::model::user::{Registration, RegistrationOutcome, UserRecord};
use common::model::volunteer::{Volunteer, VolunteerDraft};
use common::requests::{ErrorBody, LoginRequest, LoginResponse, PasswordChange};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpGateway {
    base: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Same gateway, sending `Authorization: Bearer <token>` on every call.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send_json<B, T>(&self, builder: RequestBuilder, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .authed(builder)
            .json(body)
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        read_json(request.send().await).await
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, GatewayError> {
        read_json(self.authed(builder).send().await).await
    }

    pub async fn list_models(&self) -> Result<Vec<Exhibit>, GatewayError> {
        self.fetch(Request::get(&self.url("/api/models"))).await
    }

    pub async fn create_model(&self, draft: &ExhibitDraft) -> Result<Vec<Exhibit>, GatewayError> {
        self.send_json(Request::post(&self.url("/api/models")), draft).await
    }

    pub async fn update_model(&self, id: i64, changes: &ExhibitChanges) -> Result<Vec<Exhibit>, GatewayError> {
        self.send_json(Request::put(&self.url(&format!("/api/models/{id}"))), changes)
            .await
    }

    pub async fn delete_model(&self, id: i64) -> Result<Vec<Exhibit>, GatewayError> {
        self.fetch(Request::delete(&self.url(&format!("/api/models/{id}"))))
            .await
    }

    pub async fn list_ratings(&self) -> Result<Vec<Rating>, GatewayError> {
        self.fetch(Request::get(&self.url("/api/ratings"))).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<RegistrationOutcome, GatewayError> {
        self.send_json(Request::post(&self.url("/api/users/register")), registration)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, GatewayError> {
        self.fetch(Request::get(&self.url("/api/users"))).await
    }

    pub async fn list_volunteers(&self) -> Result<Vec<Volunteer>, GatewayError> {
        self.fetch(Request::get(&self.url("/api/volunteers"))).await
    }

    pub async fn create_volunteer(&self, draft: &VolunteerDraft) -> Result<Vec<Volunteer>, GatewayError> {
        self.send_json(Request::post(&self.url("/api/volunteers")), draft).await
    }

    pub async fn delete_volunteer(&self, id: i64) -> Result<Vec<Volunteer>, GatewayError> {
        self.fetch(Request::delete(&self.url(&format!("/api/volunteers/{id}"))))
            .await
    }

    pub async fn submit_feedback(&self, feedback: &FeedbackSubmission) -> Result<Vec<FeedbackSubmission>, GatewayError> {
        self.send_json(Request::post(&self.url("/api/feedback")), feedback).await
    }

    pub async fn list_feedback(&self) -> Result<Vec<FeedbackSubmission>, GatewayError> {
        self.fetch(Request::get(&self.url("/api/feedback"))).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, GatewayError> {
        self.send_json(Request::post(&self.url("/api/admin/login")), request)
            .await
    }

    pub async fn logout(&self) -> Result<(), GatewayError> {
        let response = self
            .authed(Request::post(&self.url("/api/admin/logout")))
            .send()
            .await;
        expect_empty(response).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), GatewayError> {
        let request = self
            .authed(Request::post(&self.url("/api/admin/password")))
            .json(change)
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        expect_empty(request.send().await).await
    }
}

impl RatingGateway for HttpGateway {
    async fn ratings_for_visitor(&self, user_id: &str) -> Result<Vec<Rating>, GatewayError> {
        self.fetch(Request::get(&self.url("/api/ratings")).query([("user_id", user_id)]))
            .await
    }

    async fn insert_rating(&self, rating: &NewRating) -> Result<Vec<Rating>, GatewayError> {
        self.send_json(Request::post(&self.url("/api/ratings")), rating).await
    }
}

impl ExhibitSource for HttpGateway {
    async fn fetch_exhibits(&self) -> Result<Vec<Exhibit>, GatewayError> {
        self.list_models().await
    }
}

impl RatingSource for HttpGateway {
    async fn fetch_ratings(&self) -> Result<Vec<Rating>, GatewayError> {
        self.list_ratings().await
    }
}

async fn check(response: Result<Response, gloo_net::Error>) -> Result<Response, GatewayError> {
    let response = response.map_err(|e| GatewayError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => response.status_text(),
    };
    Err(GatewayError::from_status(status, message))
}

async fn read_json<T: DeserializeOwned>(response: Result<Response, gloo_net::Error>) -> Result<T, GatewayError> {
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

async fn expect_empty(response: Result<Response, gloo_net::Error>) -> Result<(), GatewayError> {
    check(response).await.map(|_| ())
}
