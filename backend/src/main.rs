use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use shambala_backend::{app, config::Config, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shambala_backend=debug,tower_http=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    tracing::info!(
        "Using Contentful space {} ({}) at {}",
        config.contentful.space_id,
        config.contentful.environment_id,
        config.contentful.base_url
    );

    let state = Arc::new(AppState::new(&config));
    let app = app(state, &config);

    tracing::info!("Starting server on port {}", config.port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
