use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::metrics::HttpMetrics;
use crate::middleware::rate_limit::ClientRateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: steamshark_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-client-IP request budget, swept by a background task.
    pub rate_limiter: Arc<ClientRateLimiter>,
    /// Request metrics exported at `/metrics`.
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    /// Build state with a fresh rate limiter and metrics registry.
    pub fn new(
        pool: steamshark_db::DbPool,
        config: ServerConfig,
    ) -> Result<Self, prometheus::Error> {
        let rate_limiter = Arc::new(ClientRateLimiter::new(&config.rate_limit));
        let metrics = Arc::new(HttpMetrics::new()?);

        Ok(Self {
            pool,
            config: Arc::new(config),
            rate_limiter,
            metrics,
        })
    }
}
