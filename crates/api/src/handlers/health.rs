//! Liveness, readiness and metrics export.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub ready: bool,
}

/// GET /healthz -- the process is up. Never touches the database.
pub async fn healthz() -> Json<ApiResponse<Liveness>> {
    Json(ApiResponse::success("API is healthy", Liveness { ok: true }))
}

/// GET /readyz -- 200 when the database answers, 503 otherwise.
pub async fn readyz(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Readiness>>) {
    match steamshark_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success("Database is ready", Readiness { ready: true })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::failure(
                    "Database unreachable",
                    Readiness { ready: false },
                )),
            )
        }
    }
}

/// GET /metrics -- Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let body = state
        .metrics
        .export()
        .map_err(|e| AppError::InternalError(format!("metrics export failed: {e}")))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
