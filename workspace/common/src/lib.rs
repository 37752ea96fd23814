//! Common transport-layer types shared between the API server, the CLI and
//! the remote client. Page reports produced by `compute` are expressed in
//! these shapes so every consumer serializes them the same way.

mod format;
mod remote;
mod reports;

pub use format::{
    MONTH_NAMES, format_billions, format_millions, format_thousands, month_label, month_name,
    round_half_up, round_to,
};
pub use remote::{
    DetailsQuery, DetailsResponse, InvestmentPrediction, InvestmentRequest, RawProductDetail,
    SlaValue,
};
pub use reports::{
    AllocationReport, CategoryDiscount, CategoryMonth, CategoryOptions, CategoryReport, CategoryShare,
    CategorySummary, ClimateDay, ClimateMonthMetrics, ClimateReport, DailySale, DetailPage,
    DetailRow, Gauge, Kpi, MediaInvestment, MonthGridDto, MonthReport, MonthShare,
    ProductTypeMonth, ShareSlice, Sparkline, SpecialDay, SpecialDayKind, StreamAllocation,
    SubcategoryOptions, SubcategorySummary, TaxonomyOptions, VerticalUnits, YearlyReport,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the server and read back by the CLI
/// and integration tests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful payload.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
