//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Countries
        .route("/api/countries", get(handlers::list_countries))
        .route("/api/countries/search", get(handlers::search_countries))
        .route("/api/countries/region/:region", get(handlers::list_by_region))
        .route("/api/countries/:code", get(handlers::get_country))
        .route("/api/country/:code", get(handlers::get_country))

        // Cache
        .route("/api/cache/stats", get(handlers::get_cache_stats))

        .with_state(state)
}
