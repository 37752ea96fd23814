use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::Json,
};
use common::{ApiResponse, MonthReport};
use compute::monthly::monthly_page;
use tracing::{debug, instrument};

use crate::schemas::{ApiError, AppState, CachedData, ErrorResponse, ok};

/// Get the monthly analysis page
#[utoipa::path(
    get,
    path = "/api/v1/monthly/{month}",
    tag = "analysis",
    params(
        ("month" = u32, Path, description = "Month of the year (1-12)"),
    ),
    responses(
        (status = 200, description = "Monthly analysis retrieved successfully", body = ApiResponse<MonthReport>),
        (status = 400, description = "Month out of range or not a number", body = ErrorResponse),
        (status = 404, description = "No data for the month", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_monthly(
    month: Result<Path<u32>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MonthReport>>, ApiError> {
    let Path(month) = month.map_err(ErrorResponse::from_path)?;
    let cache_key = format!("monthly_{}", month);

    if let Some(CachedData::Monthly(report)) = state.cache.get(&cache_key).await {
        return Ok(ok(report, "Monthly analysis retrieved from cache"));
    }

    let report = monthly_page(&state.dataset, month).map_err(ErrorResponse::from_compute)?;
    debug!(
        "Computed monthly report for {} {} with {} daily points",
        report.month_name,
        report.year,
        report.daily_sales.len()
    );

    state
        .cache
        .insert(cache_key, CachedData::Monthly(report.clone()))
        .await;

    Ok(ok(report, "Monthly analysis retrieved successfully"))
}
