use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{ApiResponse, CategoryReport, TaxonomyOptions};
use compute::category::{category_report, taxonomy_options};
use tracing::{debug, instrument, warn};

use crate::schemas::{ApiError, AppState, CachedData, ErrorResponse, ok};

const CACHE_KEY: &str = "categories";

/// Get the category analysis page
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "analysis",
    responses(
        (status = 200, description = "Category analysis retrieved successfully", body = ApiResponse<CategoryReport>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoryReport>>, ApiError> {
    if let Some(CachedData::Categories(report)) = state.cache.get(CACHE_KEY).await {
        return Ok(ok(report, "Category analysis retrieved from cache"));
    }

    let report = category_report(&state.dataset).map_err(ErrorResponse::from_compute)?;
    debug!("Computed category report with {} categories", report.categories.len());

    state
        .cache
        .insert(CACHE_KEY.to_string(), CachedData::Categories(report.clone()))
        .await;

    Ok(ok(report, "Category analysis retrieved successfully"))
}

/// Get the details page filter options
#[utoipa::path(
    get,
    path = "/api/v1/taxonomy",
    tag = "details",
    responses(
        (status = 200, description = "Filter options retrieved successfully", body = ApiResponse<TaxonomyOptions>)
    )
)]
#[instrument(skip(state))]
pub async fn get_taxonomy(State(state): State<AppState>) -> Json<ApiResponse<TaxonomyOptions>> {
    ok(
        taxonomy_options(&state.dataset.taxonomy, None),
        "Filter options retrieved successfully",
    )
}

/// Get the filter options of one category
#[utoipa::path(
    get,
    path = "/api/v1/taxonomy/{category}",
    tag = "details",
    params(
        ("category" = String, Path, description = "Category name, e.g. Camera"),
    ),
    responses(
        (status = 200, description = "Filter options retrieved successfully", body = ApiResponse<TaxonomyOptions>),
        (status = 404, description = "Unknown category", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_category_taxonomy(
    Path(category): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TaxonomyOptions>>, ApiError> {
    let options = taxonomy_options(&state.dataset.taxonomy, Some(&category));
    if options.categories.is_empty() {
        warn!("Category '{}' is not part of the taxonomy", category);
        return Err(ErrorResponse::new(
            StatusCode::NOT_FOUND,
            "CATEGORY_NOT_FOUND",
            format!("Unknown category '{}'", category),
        ));
    }

    Ok(ok(options, "Filter options retrieved successfully"))
}
