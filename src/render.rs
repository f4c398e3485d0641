//! Template loading.
//!
//! Templates live under `templates/` and are parsed once at startup; handlers
//! receive the parsed set through the shared application state.

use anyhow::{Context, Result};
use tera::Tera;

/// Parse every template under `templates/`.
pub fn load_templates() -> Result<Tera> {
    Tera::new("templates/**/*.html").context("Failed to parse templates")
}
