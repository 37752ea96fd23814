//! Weather-driven discount heuristic and the climate analysis page.

use chrono::Datelike;
use common::{
    CategoryDiscount, ClimateDay, ClimateMonthMetrics, ClimateReport, month_name, round_half_up,
    round_to,
};
use model::day_record::{ClimateSeries, DayRecord, Weather};
use model::discounts::{CATEGORIES, CategoryDiscountTable};
use model::fixtures::Dataset;
use tracing::{debug, instrument, warn};

use crate::error::{ComputeError, Result};

const BASE_DISCOUNT: f64 = 5.0;
const MAX_DISCOUNT: f64 = 25.0;
/// Average selling price used to estimate units from GMV.
const AVERAGE_UNIT_PRICE: f64 = 50.0;

/// Discount percentage suggested for a day's weather.
///
/// Starts at 5 %, adds 5 for freezing days or 3 for hot days (> 25 °C),
/// 4 for heavy rain (> 20 mm) and 6 for any snow. Never exceeds 25 %.
pub fn discount_for(weather: &Weather) -> f64 {
    let mut discount = BASE_DISCOUNT;

    if weather.mean_temp_c < 0.0 {
        discount += 5.0;
    } else if weather.mean_temp_c > 25.0 {
        discount += 3.0;
    }

    if weather.total_rain_mm > 20.0 {
        discount += 4.0;
    }
    if weather.total_snow_cm > 0.0 {
        discount += 6.0;
    }

    discount.min(MAX_DISCOUNT)
}

/// Chart points for each day that has weather attached.
pub fn daily_points(days: &[DayRecord]) -> Vec<ClimateDay> {
    days.iter()
        .filter_map(|record| {
            let weather = record.weather()?;
            Some(ClimateDay {
                day: record.day_of_month(),
                date: record.date(),
                temp: weather.mean_temp_c,
                rain: weather.total_rain_mm,
                snow: weather.total_snow_cm,
                gmv: record.gmv(),
                discount_percentage: discount_for(&weather),
            })
        })
        .collect()
}

/// Rolls a month of points up into the figures of the month cards.
pub fn monthly_metrics(points: &[ClimateDay]) -> Option<ClimateMonthMetrics> {
    let first = points.first()?;
    let count = points.len() as f64;

    let total_gmv = round_half_up(points.iter().map(|p| p.gmv).sum());
    let avg_discount = round_to(
        points.iter().map(|p| p.discount_percentage).sum::<f64>() / count,
        1,
    );
    let discount_amount = round_half_up(total_gmv * avg_discount / 100.0);
    let gmv_after_discount = total_gmv - discount_amount;
    let units_sold = round_half_up(gmv_after_discount / AVERAGE_UNIT_PRICE).max(0.0) as u64;

    let month = first.date.month();
    Some(ClimateMonthMetrics {
        month: month_name(month).unwrap_or_default().to_string(),
        month_index: month - 1,
        mean_temp: round_to(points.iter().map(|p| p.temp).sum::<f64>() / count, 1),
        total_rain: round_to(points.iter().map(|p| p.rain).sum(), 1),
        total_snow: round_to(points.iter().map(|p| p.snow).sum(), 1),
        gmv: total_gmv,
        discount_percentage: avg_discount,
        discount_amount,
        gmv_after_discount,
        units_sold,
    })
}

/// Month metrics for every month of `year` present in the series.
pub fn year_overview(series: &ClimateSeries, year: i32) -> Result<Vec<ClimateMonthMetrics>> {
    if !series.has_year(year) {
        return Err(ComputeError::NotFound(format!("no climate data for {}", year)));
    }

    Ok(series
        .months(year)
        .into_iter()
        .filter_map(|month| monthly_metrics(&daily_points(series.month(year, month))))
        .collect())
}

/// Historical discount of each category for the month, highest first.
///
/// Categories without a recorded value are reported with 0 %.
pub fn category_discounts(
    table: &CategoryDiscountTable,
    year: i32,
    month: u32,
) -> Vec<CategoryDiscount> {
    let mut discounts: Vec<CategoryDiscount> = CATEGORIES
        .iter()
        .map(|category| CategoryDiscount {
            category: category.to_string(),
            discount_percentage: table.discount(year, month, category).unwrap_or(0.0),
        })
        .collect();
    discounts.sort_by(|a, b| b.discount_percentage.total_cmp(&a.discount_percentage));
    discounts
}

/// Builds the climate discount analysis page for a year and a selected month.
#[instrument(skip(dataset))]
pub fn climate_report(dataset: &Dataset, year: i32, month: u32) -> Result<ClimateReport> {
    if !(1..=12).contains(&month) {
        return Err(ComputeError::InvalidInput(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }

    let monthly = year_overview(&dataset.climate, year)?;
    let daily = daily_points(dataset.climate.month(year, month));
    if daily.is_empty() {
        warn!("No climate days recorded for {}-{:02}", year, month);
    }
    let current = monthly_metrics(&daily);

    debug!(
        "Climate report for {}-{:02}: {} months, {} days",
        year,
        month,
        monthly.len(),
        daily.len()
    );

    Ok(ClimateReport {
        year,
        month,
        monthly,
        current,
        daily,
        categories: category_discounts(&dataset.discounts, year, month),
    })
}
