//! Exhibit models shown to visitors.
//!
//! `model_number` is the public identifier printed next to each exhibit and
//! encoded into its QR code. `id` is the storage row id used by admin edits.
//! `visited` and `rating_submitted` only live in the browser cache; the
//! service never stores them.

use serde::{Deserialize, Serialize};

use super::language::Language;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibit {
    #[serde(default)]
    pub id: Option<i64>,
    pub model_number: u32,
    pub name_en: String,
    #[serde(default)]
    pub name_ur: String,
    #[serde(default)]
    pub name_kn: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_ur: String,
    #[serde(default)]
    pub description_kn: String,
    pub location: String,
    #[serde(default)]
    pub visited: u8,
    #[serde(default)]
    pub rating_submitted: bool,
}

impl Exhibit {
    pub fn is_visited(&self) -> bool {
        self.visited != 0
    }

    /// Localised name; falls back to English when the translation is empty.
    pub fn name(&self, lang: Language) -> &str {
        let localised = match lang {
            Language::Urdu => &self.name_ur,
            Language::Kannada => &self.name_kn,
            Language::English | Language::RomanUrdu => &self.name_en,
        };
        if localised.trim().is_empty() {
            &self.name_en
        } else {
            localised
        }
    }

    pub fn description(&self, lang: Language) -> &str {
        let localised = match lang {
            Language::Urdu => &self.description_ur,
            Language::Kannada => &self.description_kn,
            Language::English | Language::RomanUrdu => &self.description_en,
        };
        if localised.trim().is_empty() {
            &self.description_en
        } else {
            localised
        }
    }
}

/// Full set of editable fields, used by create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExhibitDraft {
    pub model_number: u32,
    pub name_en: String,
    #[serde(default)]
    pub name_ur: String,
    #[serde(default)]
    pub name_kn: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_ur: String,
    #[serde(default)]
    pub description_kn: String,
    pub location: String,
}

impl ExhibitDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model_number == 0 {
            return Err(ValidationError::ModelNumber);
        }
        if self.name_en.trim().is_empty() {
            return Err(ValidationError::Required("name (English)"));
        }
        if self.location.trim().is_empty() {
            return Err(ValidationError::Required("location"));
        }
        Ok(())
    }
}

impl From<&Exhibit> for ExhibitDraft {
    fn from(exhibit: &Exhibit) -> Self {
        Self {
            model_number: exhibit.model_number,
            name_en: exhibit.name_en.clone(),
            name_ur: exhibit.name_ur.clone(),
            name_kn: exhibit.name_kn.clone(),
            description_en: exhibit.description_en.clone(),
            description_ur: exhibit.description_ur.clone(),
            description_kn: exhibit.description_kn.clone(),
            location: exhibit.location.clone(),
        }
    }
}

/// Partial update; `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExhibitChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ur: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_kn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ur: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_kn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ExhibitChanges {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model_number == Some(0) {
            return Err(ValidationError::ModelNumber);
        }
        if matches!(&self.name_en, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::Required("name (English)"));
        }
        if matches!(&self.location, Some(location) if location.trim().is_empty()) {
            return Err(ValidationError::Required("location"));
        }
        Ok(())
    }
}

impl From<ExhibitDraft> for ExhibitChanges {
    fn from(draft: ExhibitDraft) -> Self {
        Self {
            model_number: Some(draft.model_number),
            name_en: Some(draft.name_en),
            name_ur: Some(draft.name_ur),
            name_kn: Some(draft.name_kn),
            description_en: Some(draft.description_en),
            description_ur: Some(draft.description_ur),
            description_kn: Some(draft.description_kn),
            location: Some(draft.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exhibit() -> Exhibit {
        Exhibit {
            id: Some(1),
            model_number: 3,
            name_en: "Cave of Hira".to_string(),
            name_ur: "غار حرا".to_string(),
            name_kn: String::new(),
            description_en: "Mountain cave near Makkah".to_string(),
            description_ur: String::new(),
            description_kn: String::new(),
            location: "Hall A".to_string(),
            visited: 0,
            rating_submitted: false,
        }
    }

    #[test]
    fn empty_translations_fall_back_to_english() {
        let e = exhibit();
        assert_eq!(e.name(Language::Urdu), "غار حرا");
        assert_eq!(e.name(Language::Kannada), "Cave of Hira");
        assert_eq!(e.description(Language::Urdu), "Mountain cave near Makkah");
    }

    #[test]
    fn client_flags_default_when_missing_from_payload() {
        let json = r#"{"id":4,"model_number":9,"name_en":"Masjid","location":"Hall B"}"#;
        let e: Exhibit = serde_json::from_str(json).unwrap();
        assert_eq!(e.visited, 0);
        assert!(!e.rating_submitted);
        assert_eq!(e.name_ur, "");
    }

    #[test]
    fn drafts_require_number_name_and_location() {
        let mut draft = ExhibitDraft::from(&exhibit());
        assert!(draft.validate().is_ok());

        draft.model_number = 0;
        assert_eq!(draft.validate(), Err(ValidationError::ModelNumber));

        draft.model_number = 3;
        draft.location = "  ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::Required("location")));
    }
}
