use axum::{extract::State, response::Json};
use common::{ApiResponse, YearlyReport};
use compute::yearly::yearly_report;
use tracing::{debug, instrument};

use crate::schemas::{AppState, CachedData, ok};

const CACHE_KEY: &str = "yearly";

/// Get the yearly analysis page
#[utoipa::path(
    get,
    path = "/api/v1/yearly",
    tag = "analysis",
    responses(
        (status = 200, description = "Yearly analysis retrieved successfully", body = ApiResponse<YearlyReport>)
    )
)]
#[instrument(skip(state))]
pub async fn get_yearly(State(state): State<AppState>) -> Json<ApiResponse<YearlyReport>> {
    if let Some(CachedData::Yearly(report)) = state.cache.get(CACHE_KEY).await {
        return ok(report, "Yearly analysis retrieved from cache");
    }

    let report = yearly_report(&state.dataset.yearly);
    debug!("Computed yearly report with {} months", report.monthly_gmv.len());

    state
        .cache
        .insert(CACHE_KEY.to_string(), CachedData::Yearly(report.clone()))
        .await;

    ok(report, "Yearly analysis retrieved successfully")
}
