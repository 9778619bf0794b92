use serde::{Deserialize, Serialize};

/// Display languages offered to visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ur")]
    Urdu,
    #[serde(rename = "kn")]
    Kannada,
    /// Urdu written in Latin script.
    #[serde(rename = "ru")]
    RomanUrdu,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Urdu,
        Language::Kannada,
        Language::RomanUrdu,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Urdu => "ur",
            Language::Kannada => "kn",
            Language::RomanUrdu => "ru",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Whether text in this language is laid out right to left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Urdu)
    }
}
