//! Handlers for the `/websites` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use steamshark_core::types::DbId;
use steamshark_db::models::website::{
    to_extension_entries, CreateWebsite, ExtensionEntry, UpdateWebsite, Website, WebsiteDetail,
    WebsiteReturn,
};
use steamshark_db::repositories::{OccurrenceRepo, WebsiteRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::{ExtensionParams, ListWebsitesParams};
use crate::response::{ApiResponse, ListMetadata};
use crate::state::AppState;

const ENTITY: &str = "Website";

/// POST /api/v1/websites
///
/// 201 when a new record is stored, 200 with the stored record when the
/// domain already exists.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWebsite>,
) -> AppResult<(StatusCode, Json<ApiResponse<WebsiteReturn>>)> {
    let row = input.normalize()?;
    let (was_existing, website) = WebsiteRepo::create_or_get(&state.pool, &row).await?;

    if was_existing {
        return Ok((
            StatusCode::OK,
            Json(ApiResponse::success("Website already exists", website.into())),
        ));
    }

    tracing::info!(
        website_id = %website.id,
        domain = %website.domain,
        risk_level = %website.risk_level,
        "Website created"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Website created", website.into())),
    ))
}

/// GET /api/v1/websites
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListWebsitesParams>,
) -> AppResult<Json<ApiResponse<Vec<WebsiteReturn>>>> {
    let filter = params.filter();
    let page = params.pagination();

    let websites = WebsiteRepo::list(&state.pool, &filter, page).await?;
    let total = WebsiteRepo::count(&state.pool, &filter).await?;

    let data: Vec<WebsiteReturn> = websites.into_iter().map(WebsiteReturn::from).collect();
    Ok(Json(
        ApiResponse::success("Websites listed", data).with_metadata(ListMetadata {
            total,
            page: page.page,
            page_size: page.page_size,
        }),
    ))
}

/// GET /api/v1/websites/extension
pub async fn list_for_extension(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ExtensionParams>,
) -> AppResult<Json<ApiResponse<Vec<ExtensionEntry>>>> {
    let websites = WebsiteRepo::list_for_extension(&state.pool, params.trust()).await?;
    Ok(Json(ApiResponse::success(
        "Websites listed",
        to_extension_entries(websites),
    )))
}

/// GET /api/v1/websites/{identification}
///
/// A UUID is looked up by ID, anything else by exact domain.
pub async fn get(
    State(state): State<AppState>,
    Path(identification): Path<String>,
) -> AppResult<Json<ApiResponse<WebsiteDetail>>> {
    let identification = identification.trim();
    if identification.is_empty() {
        return Err(AppError::BadRequest(
            "missing identification, it must be either id or domain".to_string(),
        ));
    }

    let website = match DbId::parse_str(identification) {
        Ok(id) => WebsiteRepo::find_by_id(&state.pool, id).await?,
        Err(_) => WebsiteRepo::find_by_domain(&state.pool, identification).await?,
    }
    .ok_or_else(|| AppError::not_found(ENTITY, identification))?;

    let occurrences = OccurrenceRepo::list_by_website(&state.pool, website.id).await?;

    Ok(Json(ApiResponse::success(
        "Website found",
        WebsiteDetail {
            website: website.into(),
            occurrences,
        },
    )))
}

/// PUT /api/v1/websites/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateWebsite>,
) -> AppResult<Json<ApiResponse<WebsiteReturn>>> {
    let id = parse_website_id(&id)?;
    let patch = input.normalize()?;

    let website = WebsiteRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, id))?;

    Ok(Json(ApiResponse::success("Website updated", website.into())))
}

/// DELETE /api/v1/websites/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_website_id(&id)?;

    if WebsiteRepo::hard_delete(&state.pool, id).await? {
        tracing::info!(website_id = %id, "Website deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY, id))
    }
}

/// POST /api/v1/websites/{id}/verify
pub async fn verify(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<WebsiteReturn>>> {
    let id = parse_website_id(&id)?;

    let website: Website = WebsiteRepo::verify(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, id))?;

    tracing::info!(website_id = %id, "Website verified");
    Ok(Json(ApiResponse::success("Website verified", website.into())))
}

/// Parse a path segment as a website ID.
pub(crate) fn parse_website_id(raw: &str) -> AppResult<DbId> {
    DbId::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("invalid website id '{raw}'")))
}
