//! Language type: fixed set of supported UI languages.
//!
//! Every request resolves to exactly one member of this enum. Unknown or
//! missing codes coerce to English, so resolution is total and never fails.

use serde::Serialize;

/// A supported UI language.
///
/// The variant set is fixed at compile time; all locale-dependent lookups
/// (field selection, UI strings) are `match` expressions over it rather than
/// runtime string keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default / fallback language)
    En,
    /// French
    Fr,
    /// Kinyarwanda
    Rw,
    /// Kiswahili
    Sw,
}

/// All supported languages, in display order.
pub const ALL_LANGUAGES: [Language; 4] =
    [Language::En, Language::Fr, Language::Rw, Language::Sw];

impl Language {
    /// Parse a language code, case-insensitively.
    ///
    /// Returns `None` for anything outside the supported set.
    pub fn from_code(code: &str) -> Option<Language> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            "rw" => Some(Language::Rw),
            "sw" => Some(Language::Sw),
            _ => None,
        }
    }

    /// Resolve a session value to a language.
    ///
    /// Missing, empty, or unsupported values all resolve to English. This is
    /// the single entry point for per-request language selection: handlers
    /// call it with whatever the session currently holds and always get a
    /// usable language back.
    pub fn resolve(session_value: Option<&str>) -> Language {
        session_value
            .and_then(Language::from_code)
            .unwrap_or(Language::En)
    }

    /// ISO 639-1 code, lowercase.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Rw => "rw",
            Language::Sw => "sw",
        }
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "French",
            Language::Rw => "Kinyarwanda",
            Language::Sw => "Kiswahili",
        }
    }

    /// Name of the language in its own script.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "Français",
            Language::Rw => "Ikinyarwanda",
            Language::Sw => "Kiswahili",
        }
    }

    /// Whether this is the fallback language for missing translations.
    pub fn is_default(&self) -> bool {
        matches!(self, Language::En)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
