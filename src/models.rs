//! Content entities and the localized text accessor.
//!
//! Every translatable field is stored as four columns (en/fr/rw/sw) and
//! surfaced here as a [`LocalizedText`]. Picking the variant for a request's
//! language is a `match` over the fixed [`Language`] enum, with a single
//! fallback rule: a blank variant falls back to English.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One translatable text field, one variant per supported language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default)]
    pub fr: String,
    #[serde(default)]
    pub rw: String,
    #[serde(default)]
    pub sw: String,
}

impl LocalizedText {
    /// Same text in all four languages. Used by fixtures and tests.
    pub fn uniform(text: &str) -> Self {
        Self {
            en: text.to_string(),
            fr: text.to_string(),
            rw: text.to_string(),
            sw: text.to_string(),
        }
    }

    /// The variant for `lang`, falling back to English when it is blank.
    ///
    /// Falling back to the English variant is the only missing-translation
    /// policy; an empty English variant comes back empty.
    pub fn get(&self, lang: Language) -> &str {
        let text = match lang {
            Language::En => &self.en,
            Language::Fr => &self.fr,
            Language::Rw => &self.rw,
            Language::Sw => &self.sw,
        };
        if text.is_empty() {
            &self.en
        } else {
            text
        }
    }
}

/// Morning or evening mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassType {
    Morning,
    Evening,
}

impl MassType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MassType::Morning => "morning",
            MassType::Evening => "evening",
        }
    }

    /// Stored values are trusted; anything unrecognized reads as morning.
    pub fn from_db(value: &str) -> MassType {
        match value {
            "evening" => MassType::Evening,
            _ => MassType::Morning,
        }
    }
}

/// A scheduled mass. Dates and times are ISO-8601 strings (`YYYY-MM-DD`,
/// `HH:MM`), which sort correctly as text.
#[derive(Debug, Clone, Serialize)]
pub struct MassSchedule {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub mass_type: MassType,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Homily {
    pub id: i64,
    pub published_at: String,
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealingPrayer {
    pub id: i64,
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i64,
    pub event_date: String,
    pub start_time: String,
    pub end_time: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Advertisement {
    pub id: i64,
    pub published_at: String,
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub image: Option<String>,
    pub created_at: String,
}

/// A bookable room. Room copy is maintained in English only; the surrounding
/// chrome is what gets localized.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub location: String,
    pub description: String,
    pub price_per_night: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomImage {
    pub id: i64,
    pub room_id: i64,
    pub image: String,
    pub alt_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Amenity {
    pub id: i64,
    pub name: String,
}

/// Publication state of a testimony. Only published ones are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestimonyStatus {
    Pending,
    Published,
}

impl TestimonyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonyStatus::Pending => "pending",
            TestimonyStatus::Published => "published",
        }
    }

    pub fn from_db(value: &str) -> TestimonyStatus {
        match value {
            "published" => TestimonyStatus::Published,
            _ => TestimonyStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Testimony {
    pub id: i64,
    pub author_name: String,
    pub content: LocalizedText,
    pub status: TestimonyStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryItem {
    pub id: i64,
    pub caption: LocalizedText,
    pub image: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub image: Option<String>,
    pub created_at: String,
}

// ==================== Creation payloads ====================
//
// Shared by the admin API (deserialized from JSON) and the seed binary.

#[derive(Debug, Clone, Deserialize)]
pub struct NewMassSchedule {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub mass_type: MassType,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewHomily {
    pub published_at: String,
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewHealingPrayer {
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub event_date: String,
    pub start_time: String,
    pub end_time: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAdvertisement {
    pub published_at: String,
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoom {
    pub title: String,
    pub location: String,
    pub description: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<NewRoomImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoomImage {
    pub image: String,
    pub alt_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTestimony {
    pub author_name: String,
    pub content: LocalizedText,
    #[serde(default = "default_testimony_status")]
    pub status: TestimonyStatus,
}

fn default_testimony_status() -> TestimonyStatus {
    TestimonyStatus::Pending
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGalleryItem {
    pub caption: LocalizedText,
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub role: String,
    pub image: Option<String>,
}

/// Reduce a title to a URL-safe slug: lowercase, runs of anything
/// non-alphanumeric collapsed to single dashes.
pub fn slugify(text: &str) -> String {
    static NON_ALNUM: OnceLock<regex::Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| regex::Regex::new(r"[^a-z0-9]+").unwrap());
    re.replace_all(&text.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
