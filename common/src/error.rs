//! Error types shared by the client logic and the service.
//!
//! Three families exist, matching how failures surface to a visitor:
//! - `ValidationError`: caught before any I/O and shown as an immediate alert.
//! - `GatewayError`: a remote call failed; callers log it and fall back.
//! - `CacheError`: the local key/value store refused a write.

use thiserror::Error;

/// Failure of a call across the remote data boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("remote returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The storage layer rejected a write because of a uniqueness constraint.
    #[error("record already exists")]
    Conflict,

    #[error("record not found")]
    NotFound,

    #[error("not authorized")]
    Unauthorized,

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Maps an HTTP status and body into the matching variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => GatewayError::Unauthorized,
            404 => GatewayError::NotFound,
            409 => GatewayError::Conflict,
            _ => GatewayError::Status {
                status,
                message: message.into(),
            },
        }
    }
}

/// Input rejected before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("star rating must be between 1 and 5, got {0}")]
    StarRating(u8),

    #[error("model number must be a positive integer")]
    ModelNumber,

    #[error("invalid phone number")]
    Phone,

    #[error("invalid email address")]
    Email,

    #[error("{0} must be at least 1")]
    Count(&'static str),

    #[error("please select an option for \"{0}\"")]
    MissingAnswer(&'static str),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
}

/// Failure writing to the local key/value store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("could not encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage rejected write for {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Everything that can stop a rating from being accepted.
#[derive(Debug, Error)]
pub enum RatingError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Failure while rendering a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv writer failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer could not be flushed: {0}")]
    Flush(String),

    #[error("csv output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_variants() {
        assert_eq!(GatewayError::from_status(409, "dup"), GatewayError::Conflict);
        assert_eq!(GatewayError::from_status(404, ""), GatewayError::NotFound);
        assert_eq!(GatewayError::from_status(401, ""), GatewayError::Unauthorized);
        assert_eq!(
            GatewayError::from_status(503, "down"),
            GatewayError::Status {
                status: 503,
                message: "down".to_string()
            }
        );
    }
}
