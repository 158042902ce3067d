use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Probe and metrics routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
}
