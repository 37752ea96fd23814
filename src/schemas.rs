use axum::{extract::rejection::PathRejection, http::StatusCode, response::Json};
use common::{
    AllocationReport, ApiResponse, CategoryDiscount, CategoryMonth, CategoryOptions, CategoryReport,
    CategoryShare, CategorySummary, ClimateDay, ClimateMonthMetrics, ClimateReport, DailySale, DetailPage,
    DetailRow, Gauge, InvestmentRequest, Kpi, MediaInvestment, MonthGridDto, MonthReport,
    MonthShare, ProductTypeMonth, ShareSlice, Sparkline, SpecialDay, SpecialDayKind,
    StreamAllocation, SubcategoryOptions, SubcategorySummary, TaxonomyOptions, VerticalUnits,
    YearlyReport,
};
use compute::ComputeError;
use model::ModelError;
use model::fixtures::Dataset;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::climate::ClimateQuery;
use crate::handlers::details::DetailsRequest;
use crate::handlers::investments::{EventInput, EventKindInput, InvestmentPlan, PredictRequest};
use crate::remote::{RemoteClient, RemoteError};

/// Message shown when the remote service cannot be reached.
pub const REMOTE_FAILURE_MESSAGE: &str = "Error fetching data. Please try again.";

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Fixture records every page is computed from
    pub dataset: Arc<Dataset>,
    /// Client for the detail table and budget predictor
    pub remote: RemoteClient,
    /// Cache for computed pages
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Yearly(YearlyReport),
    Climate(ClimateReport),
    Monthly(MonthReport),
    Categories(CategoryReport),
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    pub fn new(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
        (
            status,
            Json(ErrorResponse {
                error: error.into(),
                code: code.to_string(),
                success: false,
            }),
        )
    }

    /// Maps a page computation failure onto a status code.
    pub fn from_compute(err: ComputeError) -> ApiError {
        match &err {
            ComputeError::InvalidInput(_)
            | ComputeError::Model(
                ModelError::InvalidDate(_)
                | ModelError::InvalidPeriod(_)
                | ModelError::InvalidRange { .. },
            ) => {
                warn!("Rejected request: {}", err);
                Self::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", err.to_string())
            }
            ComputeError::NotFound(_) | ComputeError::Model(ModelError::UnknownCategory(_)) => {
                warn!("Not found: {}", err);
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            _ => {
                error!("Failed to compute page: {}", err);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMPUTE_ERROR",
                    "Failed to compute page",
                )
            }
        }
    }

    /// Path segments that do not parse get the same JSON body as other errors.
    pub fn from_path(rejection: PathRejection) -> ApiError {
        warn!("Rejected path: {}", rejection.body_text());
        Self::new(rejection.status(), "INVALID_PATH", rejection.body_text())
    }

    /// Remote failures reach the caller as a generic retry message.
    pub fn from_remote(err: RemoteError) -> ApiError {
        error!("Remote service call failed: {}", err);
        Self::new(StatusCode::BAD_GATEWAY, "REMOTE_ERROR", REMOTE_FAILURE_MESSAGE)
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of categories in the loaded taxonomy
    pub categories: usize,
    /// Base URL of the remote analytics service
    pub remote: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::yearly::get_yearly,
        crate::handlers::climate::get_climate,
        crate::handlers::monthly::get_monthly,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::get_taxonomy,
        crate::handlers::categories::get_category_taxonomy,
        crate::handlers::details::get_details,
        crate::handlers::investments::build_investment_request,
        crate::handlers::investments::predict_investment,
        crate::handlers::calendar::get_calendar,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ClimateQuery,
            DetailsRequest,
            EventKindInput,
            EventInput,
            InvestmentPlan,
            PredictRequest,
            YearlyReport,
            ShareSlice,
            MonthShare,
            ProductTypeMonth,
            Kpi,
            ClimateReport,
            ClimateDay,
            ClimateMonthMetrics,
            CategoryDiscount,
            MonthReport,
            DailySale,
            SpecialDay,
            SpecialDayKind,
            MediaInvestment,
            CategoryShare,
            Gauge,
            CategoryReport,
            CategorySummary,
            CategoryMonth,
            SubcategorySummary,
            VerticalUnits,
            TaxonomyOptions,
            CategoryOptions,
            SubcategoryOptions,
            DetailPage,
            DetailRow,
            Sparkline,
            InvestmentRequest,
            AllocationReport,
            StreamAllocation,
            MonthGridDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "analysis", description = "Yearly, climate, monthly and category analysis pages"),
        (name = "details", description = "Product detail table and filter options"),
        (name = "investments", description = "Marketing budget planning"),
    ),
    info(
        title = "Sales Dashboard API",
        description = "Sales analytics dashboard: GMV breakdowns, climate discount analysis, product details and media budget planning",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Wraps a payload in the standard success envelope.
pub fn ok<T>(data: T, message: &str) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data, message))
}
