//! Request and response bodies exchanged with the service that are not
//! records in their own right.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
}

/// Password change form; `confirm` must repeat `new_password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub new_password: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.new_password != self.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        Ok(())
    }
}

/// Query string of `GET /api/ratings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Error body returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_change_checks_match_before_length() {
        let change = |a: &str, b: &str| PasswordChange {
            new_password: a.to_string(),
            confirm: b.to_string(),
        };
        assert_eq!(change("abc", "abd").validate(), Err(ValidationError::PasswordMismatch));
        assert_eq!(change("abc", "abc").validate(), Err(ValidationError::PasswordTooShort(6)));
        assert!(change("secret", "secret").validate().is_ok());
    }
}
