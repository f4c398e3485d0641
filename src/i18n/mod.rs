//! Internationalization (i18n) module.
//!
//! The site serves four UI languages: English (the default and fallback),
//! French, Kinyarwanda, and Kiswahili. This module owns the language type and
//! the localized chrome strings used by the templates.
//!
//! Language selection is per request: handlers read the session's `lang`
//! value and resolve it with [`Language::resolve`], which coerces anything
//! unknown to English. There is no process-wide current language.

mod language;
pub mod strings;

pub use language::{Language, ALL_LANGUAGES};
