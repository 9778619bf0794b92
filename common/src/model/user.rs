//! Visitor registration records.
//!
//! A visitor is matched on phone number first and on the browser identity
//! second. Registering again increments `repeat_count` and adds the new group
//! size to `visitor_count`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern is valid"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Strips spacing and punctuation commonly typed into phone fields.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let phone: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    if phone.is_empty() { None } else { Some(phone) }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::Phone)
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: String,
    pub name: String,
    pub place: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_count")]
    pub visitor_count: u32,
    #[serde(default)]
    pub repeat_count: u32,
}

fn default_count() -> u32 {
    1
}

/// Registration form as submitted by a visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub user_id: String,
    pub name: String,
    pub place: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_count")]
    pub visitor_count: u32,
}

impl Registration {
    /// Trims every field and normalises the phone number.
    pub fn normalized(self) -> Self {
        Self {
            user_id: self.user_id.trim().to_string(),
            name: self.name.trim().to_string(),
            place: self.place.trim().to_string(),
            phone: blank_to_none(self.phone).and_then(|p| normalize_phone(&p)),
            email: blank_to_none(self.email).map(|e| e.to_lowercase()),
            visitor_count: self.visitor_count,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::Required("user_id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.place.trim().is_empty() {
            return Err(ValidationError::Required("place"));
        }
        if self.visitor_count == 0 {
            return Err(ValidationError::Count("visitor count"));
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Result of a registration: the stored record, plus the identity it replaced.
///
/// `merged_from` is set when the visitor was matched to an existing record
/// with a different `user_id`; the client must adopt `user.user_id` and the
/// service has already moved that identity's ratings across.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    pub user: UserRecord,
    #[serde(default)]
    pub merged_from: Option<String>,
}

/// Admin edit of a user record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            user_id: "1f2e".to_string(),
            name: " Ayesha ".to_string(),
            place: "Mysuru".to_string(),
            phone: Some("+91 98450-12345".to_string()),
            email: Some("  ".to_string()),
            visitor_count: 3,
        }
    }

    #[test]
    fn normalisation_cleans_phone_and_blank_email() {
        let r = registration().normalized();
        assert_eq!(r.name, "Ayesha");
        assert_eq!(r.phone.as_deref(), Some("+919845012345"));
        assert_eq!(r.email, None);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn name_and_place_are_mandatory() {
        let mut r = registration().normalized();
        r.place = String::new();
        assert_eq!(r.validate(), Err(ValidationError::Required("place")));
    }

    #[test]
    fn malformed_contact_details_are_rejected() {
        let mut r = registration().normalized();
        r.phone = Some("12ab".to_string());
        assert_eq!(r.validate(), Err(ValidationError::Phone));

        let mut r = registration().normalized();
        r.email = Some("not-an-address".to_string());
        assert_eq!(r.validate(), Err(ValidationError::Email));
    }

    #[test]
    fn missing_counts_default_to_one() {
        let json = r#"{"user_id":"a","name":"b","place":"c"}"#;
        let r: Registration = serde_json::from_str(json).unwrap();
        assert_eq!(r.visitor_count, 1);
    }
}
