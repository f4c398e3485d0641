use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file
    pub database_path: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Bearer token protecting the admin API; admin routes refuse everything
    /// when unset
    pub admin_token: Option<String>,

    /// Base URL prefixed to stored media paths when rendering
    pub media_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "parish.db".to_string()),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            admin_token: std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),

            media_base_url: std::env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| "/media".to_string()),
        })
    }
}
