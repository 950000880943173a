use std::sync::Arc;

use reelpick_api::{
    api::{create_router, AppState},
    config::Config,
    services::{MovieProvider, TmdbProvider},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelpick_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let provider = TmdbProvider::from_config(&config)?;
    if !provider.is_configured() {
        tracing::warn!("TMDB_API_KEY is not set, every endpoint will return empty results");
    }

    let addr = format!("{}:{}", config.host, config.port);

    // Initialize application state
    let state = AppState::new(config, Arc::new(provider));

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
