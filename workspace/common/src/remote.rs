//! Payloads of the two remote services the dashboard consumes: the
//! product-detail table and the monthly media-budget predictor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Body of `POST /get_details`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DetailsQuery {
    pub category: String,
    pub sub_category: String,
    pub vertical: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Average SLA as reported upstream: a number of days or the literal `"NA"`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum SlaValue {
    Days(f64),
    Text(String),
}

impl SlaValue {
    /// Days, when the upstream value is numeric.
    pub fn days(&self) -> Option<f64> {
        match self {
            SlaValue::Days(days) => Some(*days),
            SlaValue::Text(_) => None,
        }
    }
}

/// One product entry of the detail table, keyed by FSN id in [`DetailsResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct RawProductDetail {
    #[serde(rename = "Total_sales", default)]
    pub total_sales: f64,
    #[serde(default)]
    pub total_units: f64,
    #[serde(default)]
    pub avg_sla: Option<SlaValue>,
    #[serde(default)]
    pub total_cod: f64,
    #[serde(default)]
    pub total_prepaid: f64,
    #[serde(default)]
    pub last_week: Option<Vec<f64>>,
}

/// Detail table keyed by FSN id.
pub type DetailsResponse = BTreeMap<String, RawProductDetail>;

/// Body of `POST /calculate_month_investment`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InvestmentRequest {
    /// Month of the year, 1-12
    pub month: u32,
    /// Every holiday date in the month
    pub holiday: Vec<NaiveDate>,
    /// Every sale-day date in the month
    pub salesday: Vec<NaiveDate>,
}

/// Predicted budget split: stream id to fraction of the budget (0-1).
pub type InvestmentPrediction = BTreeMap<String, f64>;
