//! Page payloads: chart-ready series for each dashboard section.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===================== Yearly analysis =====================

/// One slice of a share chart (pie or donut).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShareSlice {
    pub name: String,
    pub value: f64,
    /// Share of the total, in percent with two decimals
    pub percentage: f64,
}

/// Monthly GMV with its share of the year.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthShare {
    /// Sort key, `2023 7`
    pub key: String,
    /// Axis label, `Jul 2023`
    pub label: String,
    pub value: f64,
    pub percentage: f64,
}

/// Monthly GMV split between luxury and mass-market products.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProductTypeMonth {
    pub key: String,
    pub label: String,
    pub luxury: f64,
    pub mass_market: f64,
}

/// Headline figure shown as a card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Kpi {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct YearlyReport {
    pub total_gmv: f64,
    pub total_gmv_display: String,
    pub payment_types: Vec<ShareSlice>,
    pub product_types: Vec<ShareSlice>,
    pub monthly_gmv: Vec<MonthShare>,
    pub monthly_by_product_type: Vec<ProductTypeMonth>,
    pub kpis: Vec<Kpi>,
}

// ===================== Climate discount analysis =====================

/// A single day of weather, sales and the weather-driven discount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClimateDay {
    pub day: u32,
    pub date: NaiveDate,
    pub temp: f64,
    pub rain: f64,
    pub snow: f64,
    pub gmv: f64,
    pub discount_percentage: f64,
}

/// Month-level rollup of [`ClimateDay`] values.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClimateMonthMetrics {
    pub month: String,
    /// Zero-based month index, January is 0
    pub month_index: u32,
    pub mean_temp: f64,
    pub total_rain: f64,
    pub total_snow: f64,
    pub gmv: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub gmv_after_discount: f64,
    pub units_sold: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryDiscount {
    pub category: String,
    pub discount_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClimateReport {
    pub year: i32,
    pub month: u32,
    pub monthly: Vec<ClimateMonthMetrics>,
    pub current: Option<ClimateMonthMetrics>,
    pub daily: Vec<ClimateDay>,
    pub categories: Vec<CategoryDiscount>,
}

// ===================== Monthly analysis =====================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpecialDayKind {
    Holiday,
    Saleday,
    Payday,
}

/// Recurring day-of-month marker drawn on daily sales charts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SpecialDay {
    pub day: u32,
    pub kind: SpecialDayKind,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DailySale {
    pub day: u32,
    pub gmv: f64,
    pub mrp: f64,
    pub special_day: Option<SpecialDay>,
}

/// Media channel spend, in thousands.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MediaInvestment {
    pub name: String,
    pub value: f64,
    pub amount: String,
}

/// Category share of monthly GMV, as a whole percentage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub value: i64,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Gauge {
    pub value: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_gmv: f64,
    pub total_gmv_display: String,
    pub average_daily_gmv: f64,
    pub average_order_value: String,
    /// Fixed customer rate cards: repetition, conversion and return
    pub kpis: Vec<Kpi>,
    pub average_gmv: f64,
    pub units_sold: u64,
    pub average_discount: f64,
    pub saleday_impact: f64,
    pub nps_score: f64,
    pub stock_value: Gauge,
    pub media_investment: Vec<MediaInvestment>,
    pub total_media_investment: f64,
    pub total_media_investment_display: String,
    pub category_gmv: Vec<CategoryShare>,
    pub daily_sales: Vec<DailySale>,
    pub special_days: Vec<SpecialDay>,
}

// ===================== Category analysis =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct VerticalUnits {
    pub name: String,
    pub units: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SubcategorySummary {
    pub id: usize,
    pub name: String,
    pub units: i64,
    pub verticals: Vec<VerticalUnits>,
}

/// GMV of one category over one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryMonth {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub gmv: f64,
    pub mrp: f64,
    pub days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategorySummary {
    pub id: usize,
    pub name: String,
    pub total_gmv: f64,
    /// GMV in thousands, used as the unit proxy on the category bar chart
    pub units: i64,
    pub total_sales: String,
    pub daily_sales: Vec<DailySale>,
    /// Month-by-month trend, oldest first
    pub monthly: Vec<CategoryMonth>,
    pub subcategories: Vec<SubcategorySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub special_days: Vec<SpecialDay>,
}

/// Filter options for the details page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TaxonomyOptions {
    pub categories: Vec<CategoryOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryOptions {
    pub name: String,
    pub subcategories: Vec<SubcategoryOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SubcategoryOptions {
    pub name: String,
    pub verticals: Vec<String>,
}

// ===================== Details =====================

/// Normalised bar heights of a small trend chart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Sparkline {
    /// Every input value was zero; draw a flat baseline instead of bars
    pub flat: bool,
    pub heights: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DetailRow {
    pub fsn_id: String,
    pub total_sales: f64,
    pub units: f64,
    /// Average SLA in days, absent when upstream reports `NA`
    pub avg_sla: Option<f64>,
    pub cod_percentage: u32,
    pub prepaid_percentage: u32,
    pub last_7_days: Vec<f64>,
    pub sparkline: Sparkline,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DetailPage {
    pub rows: Vec<DetailRow>,
    pub page: usize,
    pub per_page: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when empty
    pub first_row: usize,
    pub last_row: usize,
    pub page_window: Vec<usize>,
}

// ===================== Investments =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StreamAllocation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub percentage: f64,
    pub amount: Decimal,
    pub is_highest: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AllocationReport {
    pub total: Decimal,
    pub streams: Vec<StreamAllocation>,
}

/// Calendar layout of one month, weeks starting on Sunday.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthGridDto {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<NaiveDate>,
    pub trailing_blanks: u32,
    /// Event kinds present on each day, aligned with `days`
    pub events: Vec<Vec<String>>,
}
