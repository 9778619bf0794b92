use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub volunteer_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolunteerDraft {
    pub name: String,
    pub volunteer_code: String,
}

impl VolunteerDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.volunteer_code.trim().is_empty() {
            return Err(ValidationError::Required("volunteer code"));
        }
        Ok(())
    }
}

/// Code handed out to the n-th volunteer, e.g. `V007`.
pub fn volunteer_code(sequence: u32) -> String {
    format!("V{sequence:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_zero_padded() {
        assert_eq!(volunteer_code(7), "V007");
        assert_eq!(volunteer_code(1234), "V1234");
    }

    #[test]
    fn drafts_need_name_and_code() {
        let draft = VolunteerDraft {
            name: "Imran".to_string(),
            volunteer_code: String::new(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::Required("volunteer code")));
    }
}
