//! Localized strings for the site chrome (navigation, list controls, labels).
//!
//! Entity content comes from the database with one field per language; the
//! strings here cover everything else the templates need. The whole struct is
//! serializable so handlers can drop it into a template context as `ui`.

use crate::i18n::Language;
use serde::Serialize;

/// All localized chrome strings for one language.
#[derive(Debug, Clone, Serialize)]
pub struct UiStrings {
    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_mass_schedule: &'static str,
    pub nav_homilies: &'static str,
    pub nav_healing_prayers: &'static str,
    pub nav_events: &'static str,
    pub nav_rooms: &'static str,
    pub nav_testimonies: &'static str,
    pub nav_members: &'static str,
    pub nav_gallery: &'static str,
    pub nav_donate: &'static str,

    // ==================== List controls ====================
    /// Label on the link to the previous page
    pub previous_page: &'static str,
    /// Label on the link to the next page
    pub next_page: &'static str,
    /// Shown when a list has no entries at all
    pub nothing_here: &'static str,
    /// Link from a list card to the detail page
    pub read_more: &'static str,

    // ==================== Labels ====================
    pub published_on: &'static str,
    pub price_per_night: &'static str,
    pub related_rooms: &'static str,
    pub amenities: &'static str,
    pub morning_mass: &'static str,
    pub evening_mass: &'static str,
}

/// English chrome strings (canonical).
pub const ENGLISH: UiStrings = UiStrings {
    nav_home: "Home",
    nav_mass_schedule: "Mass Schedule",
    nav_homilies: "Homilies",
    nav_healing_prayers: "Healing Prayers",
    nav_events: "Events",
    nav_rooms: "Rooms",
    nav_testimonies: "Testimonies",
    nav_members: "Members",
    nav_gallery: "Gallery",
    nav_donate: "Donate",

    previous_page: "Previous",
    next_page: "Next",
    nothing_here: "Nothing here yet.",
    read_more: "Read more",

    published_on: "Published on",
    price_per_night: "per night",
    related_rooms: "Other rooms you may like",
    amenities: "Amenities",
    morning_mass: "Morning Mass",
    evening_mass: "Evening Mass",
};

/// French chrome strings.
pub const FRENCH: UiStrings = UiStrings {
    nav_home: "Accueil",
    nav_mass_schedule: "Horaire des messes",
    nav_homilies: "Homélies",
    nav_healing_prayers: "Prières de guérison",
    nav_events: "Événements",
    nav_rooms: "Chambres",
    nav_testimonies: "Témoignages",
    nav_members: "Membres",
    nav_gallery: "Galerie",
    nav_donate: "Faire un don",

    previous_page: "Précédent",
    next_page: "Suivant",
    nothing_here: "Rien à afficher pour le moment.",
    read_more: "Lire la suite",

    published_on: "Publié le",
    price_per_night: "par nuit",
    related_rooms: "D'autres chambres à découvrir",
    amenities: "Équipements",
    morning_mass: "Messe du matin",
    evening_mass: "Messe du soir",
};

/// Kinyarwanda chrome strings.
pub const KINYARWANDA: UiStrings = UiStrings {
    nav_home: "Ahabanza",
    nav_mass_schedule: "Gahunda ya Misa",
    nav_homilies: "Inyigisho",
    nav_healing_prayers: "Amasengesho yo gukira",
    nav_events: "Ibikorwa",
    nav_rooms: "Ibyumba",
    nav_testimonies: "Ubuhamya",
    nav_members: "Abanyamuryango",
    nav_gallery: "Amafoto",
    nav_donate: "Gutanga impano",

    previous_page: "Ibibanjirije",
    next_page: "Ibikurikira",
    nothing_here: "Nta bikubiyemo kugeza ubu.",
    read_more: "Soma byinshi",

    published_on: "Byasohotse ku wa",
    price_per_night: "ku ijoro",
    related_rooms: "Ibindi byumba wakunda",
    amenities: "Ibikoresho",
    morning_mass: "Misa yo mu gitondo",
    evening_mass: "Misa yo ku mugoroba",
};

/// Kiswahili chrome strings.
pub const KISWAHILI: UiStrings = UiStrings {
    nav_home: "Nyumbani",
    nav_mass_schedule: "Ratiba ya Misa",
    nav_homilies: "Mahubiri",
    nav_healing_prayers: "Maombi ya uponyaji",
    nav_events: "Matukio",
    nav_rooms: "Vyumba",
    nav_testimonies: "Shuhuda",
    nav_members: "Wanachama",
    nav_gallery: "Picha",
    nav_donate: "Changia",

    previous_page: "Iliyotangulia",
    next_page: "Ifuatayo",
    nothing_here: "Hakuna kilichopo kwa sasa.",
    read_more: "Soma zaidi",

    published_on: "Ilichapishwa",
    price_per_night: "kwa usiku",
    related_rooms: "Vyumba vingine unavyoweza kupenda",
    amenities: "Huduma",
    morning_mass: "Misa ya asubuhi",
    evening_mass: "Misa ya jioni",
};

/// Chrome strings for the given language.
pub fn for_language(lang: Language) -> &'static UiStrings {
    match lang {
        Language::En => &ENGLISH,
        Language::Fr => &FRENCH,
        Language::Rw => &KINYARWANDA,
        Language::Sw => &KISWAHILI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::ALL_LANGUAGES;

    #[test]
    fn test_every_language_has_strings() {
        for lang in ALL_LANGUAGES {
            let ui = for_language(lang);
            assert!(!ui.nav_home.is_empty());
            assert!(!ui.previous_page.is_empty());
            assert!(!ui.next_page.is_empty());
            assert!(!ui.nothing_here.is_empty());
        }
    }

    #[test]
    fn test_languages_differ_in_navigation() {
        assert_ne!(ENGLISH.nav_home, FRENCH.nav_home);
        assert_ne!(ENGLISH.nav_home, KINYARWANDA.nav_home);
        assert_ne!(ENGLISH.nav_home, KISWAHILI.nav_home);
    }

    #[test]
    fn test_for_language_picks_matching_set() {
        assert_eq!(for_language(Language::Fr).nav_home, "Accueil");
        assert_eq!(for_language(Language::Rw).nav_home, "Ahabanza");
        assert_eq!(for_language(Language::Sw).nav_home, "Nyumbani");
        assert_eq!(for_language(Language::En).nav_home, "Home");
    }
}
