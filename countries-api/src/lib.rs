//! # Country Info API Server
//!
//! JSON REST API over the cache-augmented country service, consumed by the
//! browser frontend.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and cache size
//! - `GET /api/countries` - All countries
//! - `GET /api/countries/search?name=&capital=&region=&timezone=` - Filtered countries
//! - `GET /api/countries/region/:region` - Countries in a region
//! - `GET /api/countries/:code` - One country by alpha-2/alpha-3 code
//! - `GET /api/country/:code` - Same as above
//! - `GET /api/cache/stats` - Cache statistics
//!
//! ## Example
//!
//! ```rust,ignore
//! use countries_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 8000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use countries_core::Result;

/// API server for the country info backend.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server talking to the configured upstream.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_state(AppState::new(config)?))
    }

    /// Creates a server around an existing state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Starts the periodic expired-entry sweep, if configured.
    fn spawn_cache_sweeper(&self) {
        let every = self.state.config.cache_sweep_seconds;
        if every == 0 {
            return;
        }

        let state = self.state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(every));
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = state.service.cache().cleanup_expired();
                if removed > 0 {
                    debug!(removed, "Swept expired cache entries");
                }
            }
        });
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            upstream = %self.state.config.upstream_url,
            cache_ttl_seconds = self.state.config.cache_ttl_seconds,
            "Country info API listening on {}",
            addr
        );

        self.spawn_cache_sweeper();
        axum::serve(listener, self.router()).await
    }
}
