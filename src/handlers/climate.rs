use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{ApiResponse, ClimateReport};
use compute::climate::climate_report;
use serde::Deserialize;
use tracing::{debug, instrument, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::schemas::{ApiError, AppState, CachedData, ErrorResponse, ok};

/// Query parameters for the climate page
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ClimateQuery {
    /// Year to analyse (default: latest year with climate data)
    #[validate(range(min = 2000, max = 2100))]
    pub year: Option<i32>,
    /// Selected month (default: first month of the year with data)
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
}

/// Get the climate discount analysis page
#[utoipa::path(
    get,
    path = "/api/v1/climate",
    tag = "analysis",
    params(ClimateQuery),
    responses(
        (status = 200, description = "Climate analysis retrieved successfully", body = ApiResponse<ClimateReport>),
        (status = 400, description = "Invalid year or month", body = ErrorResponse),
        (status = 404, description = "No climate data for the year", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_climate(
    Valid(Query(query)): Valid<Query<ClimateQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ClimateReport>>, ApiError> {
    let climate = &state.dataset.climate;
    let year = query
        .year
        .or_else(|| climate.years().last().copied())
        .unwrap_or_default();
    let month = query
        .month
        .or_else(|| climate.months(year).first().copied())
        .unwrap_or(1);
    trace!("Resolved climate selection to {}-{:02}", year, month);

    let cache_key = format!("climate_{}_{}", year, month);
    if let Some(CachedData::Climate(report)) = state.cache.get(&cache_key).await {
        return Ok(ok(report, "Climate analysis retrieved from cache"));
    }

    let report = climate_report(&state.dataset, year, month).map_err(ErrorResponse::from_compute)?;
    debug!("Computed climate report with {} days", report.daily.len());

    state
        .cache
        .insert(cache_key, CachedData::Climate(report.clone()))
        .await;

    Ok(ok(report, "Climate analysis retrieved successfully"))
}
