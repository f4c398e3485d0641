use anyhow::Result;
use parish_site::config::Config;
use parish_site::db::Database;
use parish_site::render;
use parish_site::routes::{self, AppState};
use parish_site::session::SessionStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("parish_site=info".parse()?),
        )
        .init();

    info!("Starting parish site");

    // Load configuration from environment
    let config = Config::from_env()?;

    let db = Database::new(&config.database_path)?;
    info!("Database ready at {}", config.database_path);

    let templates = render::load_templates()?;
    info!("Templates loaded");

    let state = AppState {
        config: Arc::new(config.clone()),
        db,
        sessions: SessionStore::new(),
        templates: Arc::new(templates),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("✓ Listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
