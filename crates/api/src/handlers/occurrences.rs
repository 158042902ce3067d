//! Handlers for occurrences nested under `/websites/{id}/occurrences`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use steamshark_db::models::occurrence::{CreateOccurrence, Occurrence};
use steamshark_db::repositories::{OccurrenceRepo, WebsiteRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::websites::parse_website_id;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/websites/{id}/occurrences
pub async fn list_by_website(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Occurrence>>>> {
    let website_id = parse_website_id(&id)?;

    WebsiteRepo::find_by_id(&state.pool, website_id)
        .await?
        .ok_or_else(|| AppError::not_found("Website", website_id))?;

    let occurrences = OccurrenceRepo::list_by_website(&state.pool, website_id).await?;
    Ok(Json(ApiResponse::success("Occurrences fetched", occurrences)))
}

/// POST /api/v1/websites/{id}/occurrences
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<CreateOccurrence>,
) -> AppResult<(StatusCode, Json<ApiResponse<Occurrence>>)> {
    let website_id = parse_website_id(&id)?;
    let row = input.normalize(website_id)?;

    WebsiteRepo::find_by_id(&state.pool, website_id)
        .await?
        .ok_or_else(|| AppError::not_found("Website", website_id))?;

    let occurrence = OccurrenceRepo::create(&state.pool, &row).await?;

    tracing::info!(
        website_id = %website_id,
        occurrence_id = %occurrence.id,
        severity = %occurrence.severity,
        "Occurrence reported"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Occurrence created", occurrence)),
    ))
}
