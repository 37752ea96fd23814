//! Monthly analysis page.

use chrono::NaiveDate;
use common::{
    CategoryShare, DailySale, Gauge, Kpi, MediaInvestment, MonthReport, SpecialDay, SpecialDayKind,
    format_millions, month_name, round_half_up,
};
use model::day_record::{CategorySeries, DayRecord};
use model::fixtures::Dataset;
use model::monthly::MonthlySnapshot;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::aggregate::rounded_shares;
use crate::error::{ComputeError, Result};

/// Recurring day-of-month markers drawn on every daily sales chart.
pub const SPECIAL_DAYS: [(u32, SpecialDayKind, &str); 5] = [
    (5, SpecialDayKind::Holiday, "Memorial Day"),
    (12, SpecialDayKind::Saleday, "Flash Sale"),
    (15, SpecialDayKind::Payday, "Payday"),
    (25, SpecialDayKind::Saleday, "Weekend Sale"),
    (28, SpecialDayKind::Payday, "End-Month Payday"),
];

/// Rate cards the monthly page shows for every month.
pub const MONTH_KPIS: [(&str, &str); 3] = [
    ("Customer Repetition Rate", "32.5%"),
    ("Conversion Rate", "3.8%"),
    ("Return Rate", "5.2%"),
];

const DAYS_PER_MONTH: f64 = 30.0;
const STOCK_GAUGE_MAX: f64 = 1500.0;

pub fn special_day_for(day: u32) -> Option<SpecialDay> {
    SPECIAL_DAYS
        .iter()
        .find(|(d, _, _)| *d == day)
        .map(|(day, kind, name)| SpecialDay {
            day: *day,
            kind: *kind,
            name: name.to_string(),
        })
}

pub fn special_days() -> Vec<SpecialDay> {
    SPECIAL_DAYS
        .iter()
        .filter_map(|(day, _, _)| special_day_for(*day))
        .collect()
}

/// Daily GMV and MRP summed over every category for one month.
pub fn daily_totals(series: &CategorySeries, year: i32, month: u32) -> Vec<DayRecord> {
    let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for (_, days) in series.iter() {
        for record in days.iter().filter(|r| r.is_in_month(year, month)) {
            let entry = by_date.entry(record.date()).or_default();
            entry.0 += record.gmv();
            entry.1 += record.mrp().unwrap_or(0.0);
        }
    }

    by_date
        .into_iter()
        .map(|(date, (gmv, mrp))| DayRecord::new(date, gmv).with_mrp(mrp))
        .collect()
}

/// Daily chart points with rounded values and special-day annotations.
pub fn daily_sales(days: &[DayRecord]) -> Vec<DailySale> {
    let mut sales: Vec<DailySale> = days
        .iter()
        .map(|record| DailySale {
            day: record.day_of_month(),
            gmv: round_half_up(record.gmv()),
            mrp: round_half_up(record.mrp().unwrap_or(0.0)),
            special_day: special_day_for(record.day_of_month()),
        })
        .collect();
    sales.sort_by_key(|s| s.day);
    sales
}

/// Assembles the monthly page from a snapshot and that month's daily totals.
pub fn month_report(snapshot: &MonthlySnapshot, daily: &[DayRecord]) -> MonthReport {
    let total_gmv = snapshot.category_gmv.total();
    let average_daily_gmv = total_gmv / DAYS_PER_MONTH;

    let media_investment = snapshot
        .media_spend
        .channels()
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(name, value)| MediaInvestment {
            name: name.to_string(),
            value,
            amount: format!("${}K", value),
        })
        .collect();
    let total_media_investment = snapshot.media_spend.total();

    let entries = snapshot.category_gmv.entries();
    let values: Vec<f64> = entries.iter().map(|(_, _, value)| *value).collect();
    let category_gmv = entries
        .iter()
        .zip(rounded_shares(&values))
        .map(|((_, label, value), share)| CategoryShare {
            name: label.to_string(),
            value: share,
            amount: format_millions(*value, "$"),
        })
        .collect();

    MonthReport {
        year: snapshot.year,
        month: snapshot.month,
        month_name: month_name(snapshot.month).unwrap_or_default().to_string(),
        total_gmv,
        total_gmv_display: format_millions(total_gmv, "$"),
        average_daily_gmv,
        average_order_value: format!("${}", round_half_up(average_daily_gmv / 100.0) as i64),
        kpis: MONTH_KPIS
            .iter()
            .map(|(title, value)| Kpi {
                title: title.to_string(),
                value: value.to_string(),
            })
            .collect(),
        average_gmv: snapshot.avg_gmv,
        units_sold: snapshot.units_sold,
        average_discount: snapshot.avg_discount,
        saleday_impact: snapshot.saleday_impact,
        nps_score: snapshot.nps_score,
        stock_value: Gauge {
            value: snapshot.stock_value,
            max: STOCK_GAUGE_MAX,
        },
        media_investment,
        total_media_investment,
        total_media_investment_display: format!("${:.1}K", total_media_investment),
        category_gmv,
        daily_sales: daily_sales(daily),
        special_days: special_days(),
    }
}

/// Monthly page for a month number (1-12) of the dataset.
#[instrument(skip(dataset))]
pub fn monthly_page(dataset: &Dataset, month: u32) -> Result<MonthReport> {
    if !(1..=12).contains(&month) {
        return Err(ComputeError::InvalidInput(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    let snapshot = dataset
        .monthly
        .get(month)
        .ok_or_else(|| ComputeError::NotFound(format!("no monthly snapshot for month {}", month)))?;

    let daily = daily_totals(&dataset.analytics, snapshot.year, snapshot.month);
    debug!(
        "Monthly page {}-{:02} with {} daily points",
        snapshot.year,
        snapshot.month,
        daily.len()
    );
    Ok(month_report(snapshot, &daily))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_day_lookup() {
        let flash = special_day_for(12).unwrap();
        assert_eq!(flash.kind, SpecialDayKind::Saleday);
        assert_eq!(flash.name, "Flash Sale");
        assert_eq!(special_day_for(28).unwrap().kind, SpecialDayKind::Payday);
        assert!(special_day_for(1).is_none());
        assert_eq!(special_days().len(), 5);
    }

    #[test]
    fn test_daily_totals_sum_categories() {
        let series = CategorySeries::from_json(
            r#"{
                "Camera": {"Daywise": {"2023-07-05": {"gmv": 10.4, "mrp": 20.0},
                                       "2023-08-01": {"gmv": 99.0, "mrp": 99.0}}},
                "GameCDDVD": {"Daywise": {"2023-07-05": {"gmv": 5.2, "mrp": 6.0},
                                          "2023-07-06": {"gmv": 1.0, "mrp": 1.5}}}
            }"#,
        )
        .unwrap();

        let days = daily_totals(&series, 2023, 7);
        assert_eq!(days.len(), 2);
        assert!((days[0].gmv() - 15.6).abs() < 1e-9);

        let sales = daily_sales(&days);
        assert_eq!(sales[0].day, 5);
        assert_eq!(sales[0].gmv, 16.0);
        assert_eq!(sales[0].mrp, 26.0);
        assert_eq!(sales[0].special_day.as_ref().unwrap().name, "Memorial Day");
        assert_eq!(sales[1].mrp, 2.0);
        assert!(sales[1].special_day.is_none());
    }

    #[test]
    fn test_monthly_page_for_july() {
        let dataset = Dataset::embedded().unwrap();
        let report = monthly_page(&dataset, 7).unwrap();

        assert_eq!(report.year, 2023);
        assert_eq!(report.month_name, "July");
        assert_eq!(report.stock_value.max, 1500.0);
        assert_eq!(report.category_gmv.len(), 5);
        assert_eq!(report.category_gmv[0].name, "Entertainment");
        assert!(report.media_investment.iter().all(|m| m.value > 0.0));
        assert!(report.media_investment.iter().any(|m| m.amount == "$0.2K"));
        assert!(!report.daily_sales.is_empty());
        assert!((report.average_daily_gmv - report.total_gmv / 30.0).abs() < 1e-6);

        let share_total: i64 = report.category_gmv.iter().map(|c| c.value).sum();
        assert!((99..=101).contains(&share_total));
    }

    #[test]
    fn test_monthly_page_rate_cards() {
        let dataset = Dataset::embedded().unwrap();
        let report = monthly_page(&dataset, 3).unwrap();

        let cards: Vec<(&str, &str)> = report
            .kpis
            .iter()
            .map(|kpi| (kpi.title.as_str(), kpi.value.as_str()))
            .collect();
        assert_eq!(
            cards,
            vec![
                ("Customer Repetition Rate", "32.5%"),
                ("Conversion Rate", "3.8%"),
                ("Return Rate", "5.2%"),
            ]
        );
    }

    #[test]
    fn test_monthly_page_rejects_bad_month() {
        let dataset = Dataset::embedded().unwrap();
        assert!(matches!(
            monthly_page(&dataset, 13),
            Err(ComputeError::InvalidInput(_))
        ));
    }
}
