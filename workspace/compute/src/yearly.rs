use common::{
    Kpi, MonthShare, ProductTypeMonth, ShareSlice, YearlyReport, format_billions, month_label,
};
use model::yearly::{NamedValue, YearlyBreakdown};
use tracing::instrument;

use crate::aggregate::shares;

fn share_slices(items: &[NamedValue]) -> Vec<ShareSlice> {
    let values: Vec<f64> = items.iter().map(|item| item.gmv).collect();
    items
        .iter()
        .zip(shares(&values))
        .map(|(item, percentage)| ShareSlice {
            name: item.name.clone(),
            value: item.gmv,
            percentage,
        })
        .collect()
}

fn month_key(year: i32, month: u32) -> String {
    format!("{} {}", year, month)
}

/// Builds the yearly analysis page. Month shares are derived from the
/// monthly values, so they always add up to the yearly total.
#[instrument(skip(breakdown))]
pub fn yearly_report(breakdown: &YearlyBreakdown) -> YearlyReport {
    let monthly_values: Vec<f64> = breakdown.monthly_gmv.iter().map(|m| m.gmv).collect();
    let total_gmv: f64 = monthly_values.iter().sum();

    let monthly_gmv = breakdown
        .monthly_gmv
        .iter()
        .zip(shares(&monthly_values))
        .map(|(month, percentage)| MonthShare {
            key: month_key(month.year, month.month),
            label: month_label(month.year, month.month),
            value: month.gmv,
            percentage,
        })
        .collect();

    let monthly_by_product_type = breakdown
        .monthly_by_product_type
        .iter()
        .map(|row| ProductTypeMonth {
            key: month_key(row.year, row.month),
            label: month_label(row.year, row.month),
            luxury: row.luxury,
            mass_market: row.mass_market,
        })
        .collect();

    YearlyReport {
        total_gmv,
        total_gmv_display: format_billions(total_gmv, "₹"),
        payment_types: share_slices(&breakdown.payment_types),
        product_types: share_slices(&breakdown.product_types),
        monthly_gmv,
        monthly_by_product_type,
        kpis: breakdown
            .kpis
            .iter()
            .map(|kpi| Kpi {
                title: kpi.title.clone(),
                value: kpi.value.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::fixtures::Dataset;

    #[test]
    fn test_yearly_report_from_embedded_breakdown() {
        let dataset = Dataset::embedded().unwrap();
        let report = yearly_report(&dataset.yearly);

        assert_eq!(report.monthly_gmv.len(), 12);
        assert_eq!(report.monthly_gmv[0].key, "2023 7");
        assert_eq!(report.monthly_gmv[0].label, "Jul 2023");
        assert_eq!(report.payment_types[0].name, "COD");
        assert_eq!(report.payment_types[0].percentage, 57.93);
        assert_eq!(report.kpis.len(), 5);

        let total: f64 = report.monthly_gmv.iter().map(|m| m.percentage).sum();
        assert!((total - 100.0).abs() < 0.1);
        assert!(report.total_gmv_display.starts_with('₹'));
        assert!(report.total_gmv_display.ends_with("bn"));
    }

    #[test]
    fn test_empty_breakdown() {
        let report = yearly_report(&YearlyBreakdown::default());
        assert_eq!(report.total_gmv, 0.0);
        assert!(report.monthly_gmv.is_empty());
        assert!(report.payment_types.is_empty());
    }
}
