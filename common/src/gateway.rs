//! Remote data boundary as seen by the client logic.
//!
//! Each trait covers one read or write path the core logic needs. The
//! browser implements them over HTTP; tests implement them with scripted
//! responses.

use crate::error::GatewayError;
use crate::model::exhibit::Exhibit;
use crate::model::rating::{NewRating, Rating};

#[allow(async_fn_in_trait)]
pub trait RatingGateway {
    /// Ratings stored for one visitor identity.
    async fn ratings_for_visitor(&self, user_id: &str) -> Result<Vec<Rating>, GatewayError>;

    /// Inserts a rating and returns the stored rows.
    async fn insert_rating(&self, rating: &NewRating) -> Result<Vec<Rating>, GatewayError>;
}

#[allow(async_fn_in_trait)]
pub trait ExhibitSource {
    async fn fetch_exhibits(&self) -> Result<Vec<Exhibit>, GatewayError>;
}

#[allow(async_fn_in_trait)]
pub trait RatingSource {
    /// Every rating, for aggregation.
    async fn fetch_ratings(&self) -> Result<Vec<Rating>, GatewayError>;
}

impl<T: RatingGateway + ?Sized> RatingGateway for &T {
    async fn ratings_for_visitor(&self, user_id: &str) -> Result<Vec<Rating>, GatewayError> {
        (**self).ratings_for_visitor(user_id).await
    }

    async fn insert_rating(&self, rating: &NewRating) -> Result<Vec<Rating>, GatewayError> {
        (**self).insert_rating(rating).await
    }
}

impl<T: ExhibitSource + ?Sized> ExhibitSource for &T {
    async fn fetch_exhibits(&self) -> Result<Vec<Exhibit>, GatewayError> {
        (**self).fetch_exhibits().await
    }
}

impl<T: RatingSource + ?Sized> RatingSource for &T {
    async fn fetch_ratings(&self) -> Result<Vec<Rating>, GatewayError> {
        (**self).fetch_ratings().await
    }
}
