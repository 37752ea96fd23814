use axum::{
    extract::{Path, rejection::PathRejection},
    response::Json,
};
use common::{ApiResponse, MonthGridDto};
use compute::investment::calendar_view;
use tracing::instrument;

use crate::schemas::{ApiError, ErrorResponse, ok};

/// Get the calendar layout of a month
#[utoipa::path(
    get,
    path = "/api/v1/calendar/{year}/{month}",
    tag = "investments",
    params(
        ("year" = i32, Path, description = "Year, e.g. 2024"),
        ("month" = u32, Path, description = "Month of the year (1-12)"),
    ),
    responses(
        (status = 200, description = "Month grid retrieved successfully", body = ApiResponse<MonthGridDto>),
        (status = 400, description = "Invalid year or month", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_calendar(
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<Json<ApiResponse<MonthGridDto>>, ApiError> {
    let Path((year, month)) = path.map_err(ErrorResponse::from_path)?;
    let grid = calendar_view(year, month, &[]).map_err(ErrorResponse::from_compute)?;
    Ok(ok(grid, "Month grid retrieved successfully"))
}
