use anyhow::Context;
use barter_api::{create_app, ApiConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::from_env().context("load configuration")?;

    // Create app state
    let state = AppState::new(config.engine.clone()).context("start engine")?;

    // Create the app
    let app = create_app(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "barter API server listening");

    // Run the server
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
