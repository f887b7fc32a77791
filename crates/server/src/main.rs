use catalog_client::CatalogClientError;
use server::{config::ServerConfig, routes, state::AppState};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Debug, Error)]
pub enum MoodwaveError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogClientError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[tokio::main]
async fn main() -> Result<(), MoodwaveError> {
    // Pick up Spotify credentials and paths from `.env` during local development
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},studio={level},catalog_client={level},utils={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string)
        .map_err(|e| anyhow::anyhow!("invalid log filter: {e}"))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let config = ServerConfig::from_env();
    if !config.static_root.exists() {
        tracing::warn!(
            "Static directory {} does not exist; the studio will report a misconfiguration",
            config.static_root.display()
        );
    }
    let state = AppState::new(&config)?;
    tracing::info!(
        catalog_credentials = state.catalog.has_credentials(),
        "Static assets served from {} at {}",
        config.static_root.display(),
        config.static_url.url("")
    );
    let app_router = routes::router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;
    let actual_port = listener.local_addr()?.port();

    tracing::info!("Server running on http://{}:{actual_port}", config.host);

    axum::serve(listener, app_router).await?;
    Ok(())
}
