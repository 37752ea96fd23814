//! Generic rollups shared by the dashboard pages.

use chrono::Datelike;
use common::round_to;
use model::day_record::DayRecord;
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Sum of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub gmv: f64,
    pub mrp: f64,
    /// Number of day records that fell into the month
    pub days: u32,
}

/// Groups day records by calendar month and sums GMV and MRP.
///
/// Records without an MRP contribute zero to the MRP sum. The result is
/// sorted chronologically; empty input yields an empty vector.
#[instrument(skip(records), fields(num_records = records.len()))]
pub fn monthly_rollup(records: &[DayRecord]) -> Result<Vec<MonthTotal>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let df = DataFrame::new(vec![
        Series::new(
            "year".into(),
            records.iter().map(|r| r.date().year()).collect::<Vec<i32>>(),
        )
        .into(),
        Series::new(
            "month".into(),
            records.iter().map(|r| r.date().month()).collect::<Vec<u32>>(),
        )
        .into(),
        Series::new(
            "gmv".into(),
            records.iter().map(DayRecord::gmv).collect::<Vec<f64>>(),
        )
        .into(),
        Series::new(
            "mrp".into(),
            records
                .iter()
                .map(|r| r.mrp().unwrap_or(0.0))
                .collect::<Vec<f64>>(),
        )
        .into(),
    ])?;

    let out = df
        .lazy()
        .group_by([col("year"), col("month")])
        .agg([
            col("gmv").sum().alias("gmv"),
            col("mrp").sum().alias("mrp"),
            col("gmv").count().cast(DataType::UInt32).alias("days"),
        ])
        .sort_by_exprs([col("year"), col("month")], SortMultipleOptions::default())
        .collect()?;

    debug!("Rolled {} records up into {} months", records.len(), out.height());

    let years = out.column("year")?.i32()?;
    let months = out.column("month")?.u32()?;
    let gmv = out.column("gmv")?.f64()?;
    let mrp = out.column("mrp")?.f64()?;
    let days = out.column("days")?.u32()?;

    (0..out.height())
        .map(|i| -> Result<MonthTotal> {
            Ok(MonthTotal {
                year: years.get(i).ok_or_else(|| missing("year", i))?,
                month: months.get(i).ok_or_else(|| missing("month", i))?,
                gmv: gmv.get(i).unwrap_or(0.0),
                mrp: mrp.get(i).unwrap_or(0.0),
                days: days.get(i).unwrap_or(0),
            })
        })
        .collect()
}

fn missing(column: &str, row: usize) -> ComputeError {
    ComputeError::Series(format!("null {} in rollup row {}", column, row))
}

/// Percentage of the total per value, two decimals.
///
/// An all-zero (or empty) input yields zeros.
pub fn shares(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|value| round_to(value / total * 100.0, 2))
        .collect()
}

/// Whole-number percentages as shown on the monthly page.
pub fn rounded_shares(values: &[f64]) -> Vec<i64> {
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return vec![0; values.len()];
    }
    values
        .iter()
        .map(|value| common::round_half_up(value / total * 100.0) as i64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32, gmv: f64) -> DayRecord {
        DayRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), gmv)
    }

    #[test]
    fn test_monthly_rollup_groups_and_sorts() {
        let records = vec![
            day(2024, 1, 3, 30.0).with_mrp(40.0),
            day(2023, 12, 31, 5.0).with_mrp(6.0),
            day(2024, 1, 1, 10.0).with_mrp(12.0),
            day(2024, 1, 2, 20.0),
        ];

        let totals = monthly_rollup(&records).unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!((totals[0].year, totals[0].month), (2023, 12));
        assert_eq!(totals[0].days, 1);
        assert_eq!((totals[1].year, totals[1].month), (2024, 1));
        assert_eq!(totals[1].gmv, 60.0);
        assert_eq!(totals[1].mrp, 52.0);
        assert_eq!(totals[1].days, 3);
    }

    #[test]
    fn test_monthly_rollup_empty() {
        assert!(monthly_rollup(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let percentages = shares(&[2_300_000_000.0, 1_670_000_000.0]);
        assert_eq!(percentages, vec![57.93, 42.07]);

        let percentages = shares(&[1.0, 1.0, 1.0]);
        let total: f64 = percentages.iter().sum();
        assert!((total - 100.0).abs() <= 0.05);
    }

    #[test]
    fn test_shares_zero_total() {
        assert_eq!(shares(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(shares(&[]).is_empty());
        assert_eq!(rounded_shares(&[0.0]), vec![0]);
    }

    #[test]
    fn test_rounded_shares() {
        assert_eq!(rounded_shares(&[50.0, 25.0, 25.0]), vec![50, 25, 25]);
        assert_eq!(rounded_shares(&[1.0, 2.0]), vec![33, 67]);
    }
}
