use axum::{extract::State, response::Json};
use axum_valid::Valid;
use chrono::NaiveDate;
use common::{AllocationReport, ApiResponse, InvestmentRequest};
use compute::ComputeError;
use compute::investment::{allocate, build_request, validate_budget};
use model::calendar::{CalendarEvent, EventKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiError, AppState, ErrorResponse, ok};

/// Kind of a planned calendar event
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKindInput {
    Holiday,
    SaleDay,
    PayDay,
}

impl From<EventKindInput> for EventKind {
    fn from(kind: EventKindInput) -> Self {
        match kind {
            EventKindInput::Holiday => EventKind::Holiday,
            EventKindInput::SaleDay => EventKind::SaleDay,
            EventKindInput::PayDay => EventKind::PayDay,
        }
    }
}

/// A planned event: either a single `date` or a `start_date`/`end_date` range
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EventInput {
    pub kind: EventKindInput,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EventInput {
    pub fn to_event(&self) -> compute::Result<CalendarEvent> {
        let kind = EventKind::from(self.kind);
        match (self.date, self.start_date, self.end_date) {
            (Some(date), None, None) => Ok(CalendarEvent::on_day(kind, date)),
            (None, Some(start), Some(end)) => Ok(CalendarEvent::over_range(kind, start, end)?),
            _ => Err(ComputeError::InvalidInput(
                "an event needs either `date` or both `start_date` and `end_date`".to_string(),
            )),
        }
    }
}

fn to_events(inputs: &[EventInput]) -> Result<Vec<CalendarEvent>, ApiError> {
    inputs
        .iter()
        .map(EventInput::to_event)
        .collect::<compute::Result<Vec<_>>>()
        .map_err(ErrorResponse::from_compute)
}

/// Month and calendar events to build a prediction request from
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct InvestmentPlan {
    /// Month of the year (1-12)
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[serde(default)]
    pub events: Vec<EventInput>,
}

/// Request body for a budget prediction
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct PredictRequest {
    /// Month of the year (1-12)
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[serde(default)]
    pub events: Vec<EventInput>,
    /// Budget to distribute, 1000-100000 in steps of 100
    pub amount: Decimal,
}

/// Build the predictor request for a month
#[utoipa::path(
    post,
    path = "/api/v1/investments/request",
    tag = "investments",
    request_body = InvestmentPlan,
    responses(
        (status = 200, description = "Prediction request built successfully", body = ApiResponse<InvestmentRequest>),
        (status = 400, description = "Invalid month or event", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn build_investment_request(
    Valid(Json(plan)): Valid<Json<InvestmentPlan>>,
) -> Result<Json<ApiResponse<InvestmentRequest>>, ApiError> {
    let events = to_events(&plan.events)?;
    let request = build_request(plan.month, &events).map_err(ErrorResponse::from_compute)?;
    Ok(ok(request, "Prediction request built successfully"))
}

/// Predict the budget split for a month and allocate an amount over it
#[utoipa::path(
    post,
    path = "/api/v1/investments/predict",
    tag = "investments",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Budget allocated successfully", body = ApiResponse<AllocationReport>),
        (status = 400, description = "Invalid month, event or budget", body = ErrorResponse),
        (status = 502, description = "Budget predictor failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn predict_investment(
    State(state): State<AppState>,
    Valid(Json(body)): Valid<Json<PredictRequest>>,
) -> Result<Json<ApiResponse<AllocationReport>>, ApiError> {
    validate_budget(body.amount).map_err(ErrorResponse::from_compute)?;

    let events = to_events(&body.events)?;
    let request = build_request(body.month, &events).map_err(ErrorResponse::from_compute)?;
    debug!("Requesting prediction for month {}", request.month);

    let prediction = state
        .remote
        .predict_investment(&request)
        .await
        .map_err(ErrorResponse::from_remote)?;

    let report = allocate(&prediction, body.amount).map_err(ErrorResponse::from_compute)?;
    info!(
        "Allocated {} over {} streams",
        report.total,
        report.streams.len()
    );

    Ok(ok(report, "Budget allocated successfully"))
}
