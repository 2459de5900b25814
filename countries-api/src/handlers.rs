//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use countries_core::types::{CountryRecord, FilterQuery};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /api/countries
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CountryRecord>>> {
    let countries = state.service.get_all_countries().await?;
    Ok(Json(countries))
}

/// GET /api/countries/:code
pub async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<CountryRecord>> {
    let country = state.service.get_country_by_code(&code).await?;
    Ok(Json(country))
}

/// GET /api/countries/region/:region
pub async fn list_by_region(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<Json<Vec<CountryRecord>>> {
    let countries = state.service.get_countries_by_region(&region).await?;
    Ok(Json(countries))
}

/// GET /api/countries/search
pub async fn search_countries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<CountryRecord>>> {
    let countries = state.service.search(query).await?;
    debug!(results = countries.len(), "Search served");
    Ok(Json(countries))
}

/// GET /api/cache/stats
pub async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    Json(state.service.cache_stats().into())
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cache_entries: state.service.cache().len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
