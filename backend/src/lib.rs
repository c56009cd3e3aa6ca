use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod cms;
pub mod config;
pub mod handlers {
    pub mod home_handlers;
}

use cms::client::ContentfulClient;
use config::Config;
use handlers::home_handlers;

pub struct AppState {
    pub contentful: ContentfulClient,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            contentful: ContentfulClient::new(&config.contentful),
        }
    }
}

/// API routes only, without static files or middleware.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(home_handlers::health_check))
        .route("/api/home", get(home_handlers::get_home_hero))
        .with_state(state)
}

/// Full application: API, the compiled frontend, request tracing and CORS.
/// Unknown paths get `index.html` with 200 so client-side routes load.
pub fn app(state: Arc<AppState>, config: &Config) -> Router {
    let index = format!("{}/index.html", config.static_dir.trim_end_matches('/'));
    let static_files = ServeDir::new(&config.static_dir).fallback(ServeFile::new(index));

    let cors = match config.frontend_url.parse() {
        Ok(origin) => CorsLayer::new().allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            tracing::warn!("Invalid FRONTEND_URL {}, CORS disabled", config.frontend_url);
            CorsLayer::new()
        }
    }
    .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
    .allow_headers([
        axum::http::header::CONTENT_TYPE,
        axum::http::header::ACCEPT,
        axum::http::header::ORIGIN,
    ]);

    api_router(state)
        .fallback_service(static_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
}
