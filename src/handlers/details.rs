use axum::{extract::State, response::Json};
use axum_valid::Valid;
use chrono::NaiveDate;
use common::{ApiResponse, DetailPage, DetailsQuery};
use compute::details::{DEFAULT_PAGE_SIZE, PAGE_SIZES, details_page};
use model::ModelError;
use model::taxonomy::Taxonomy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::schemas::{ApiError, AppState, ErrorResponse, ok};

/// Request body for the product details table
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct DetailsRequest {
    /// Category name, e.g. Camera
    #[validate(length(min = 1))]
    pub category: String,
    /// Subcategory; falls back to the category's first one when unknown
    pub sub_category: String,
    /// Vertical; falls back to the subcategory's first one when unknown
    pub vertical: Option<String>,
    /// First day of the range (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// Last day of the range (YYYY-MM-DD)
    pub end_date: NaiveDate,
    /// Case-insensitive FSN id filter
    #[serde(default)]
    pub search: String,
    /// Page number (default: 1)
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: usize,
    /// Rows per page: 5, 10, 15 or 20 (default: 10)
    #[serde(default = "default_per_page")]
    #[validate(custom(function = "validate_page_size"))]
    pub per_page: usize,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    DEFAULT_PAGE_SIZE
}

fn validate_page_size(per_page: usize) -> Result<(), ValidationError> {
    if PAGE_SIZES.contains(&per_page) {
        Ok(())
    } else {
        Err(ValidationError::new("page_size"))
    }
}

impl DetailsRequest {
    /// Normalises the selection against the taxonomy into the remote query.
    pub fn to_query(&self, taxonomy: &Taxonomy) -> compute::Result<DetailsQuery> {
        if self.start_date > self.end_date {
            return Err(ModelError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            }
            .into());
        }

        let selection =
            taxonomy.resolve(&self.category, &self.sub_category, self.vertical.as_deref())?;
        trace!("Resolved selection {:?}", selection);

        Ok(DetailsQuery {
            category: selection.category,
            sub_category: selection.subcategory,
            vertical: selection.vertical.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Get one page of the product details table
#[utoipa::path(
    post,
    path = "/api/v1/details",
    tag = "details",
    request_body = DetailsRequest,
    responses(
        (status = 200, description = "Details page retrieved successfully", body = ApiResponse<DetailPage>),
        (status = 400, description = "Invalid selection or paging", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
        (status = 502, description = "Remote detail service failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_details(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<DetailsRequest>>,
) -> Result<Json<ApiResponse<DetailPage>>, ApiError> {
    let query = request
        .to_query(&state.dataset.taxonomy)
        .map_err(ErrorResponse::from_compute)?;
    debug!(
        "Fetching details for {}/{}/{}",
        query.category, query.sub_category, query.vertical
    );

    let response = state
        .remote
        .get_details(&query)
        .await
        .map_err(ErrorResponse::from_remote)?;

    let page = details_page(&response, &request.search, request.page, request.per_page)
        .map_err(ErrorResponse::from_compute)?;
    info!(
        "Details page {} of {} with {} rows",
        page.page,
        page.total_pages,
        page.rows.len()
    );

    Ok(ok(page, "Details retrieved successfully"))
}
