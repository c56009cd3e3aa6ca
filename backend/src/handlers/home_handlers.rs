use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::cms::queries::{fetch_home_hero, DEFAULT_SLUG};
use crate::cms::types::HeroSection;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub slug: Option<String>,
}

pub async fn get_home_hero(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Result<Json<HeroSection>, (StatusCode, Json<Value>)> {
    let slug = query
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SLUG);

    match fetch_home_hero(&state.contentful, slug).await {
        Ok(Some(hero)) => {
            tracing::info!("Serving hero content for page {}", slug);
            Ok(Json(hero))
        }
        Ok(None) => {
            tracing::info!("No hero content for page {}", slug);
            Err((
                StatusCode::NOT_FOUND,
                Json(json!({"error": format!("No content found for page '{}'", slug)})),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to fetch hero content for {}: {}", slug, e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "Failed to load content"})),
            ))
        }
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
