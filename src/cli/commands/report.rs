use anyhow::{Context, Result, bail};
use compute::category::{category_report, taxonomy_options};
use compute::climate::climate_report;
use compute::monthly::monthly_page;
use compute::yearly::yearly_report;
use model::fixtures::Dataset;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::ReportPage;
use crate::config::AppConfig;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Computes one dashboard page from the fixtures and prints it.
pub fn report(
    config: &AppConfig,
    page: ReportPage,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    info!("Building {:?} report", page);
    let dataset =
        Dataset::load(config.fixtures_dir.as_deref()).context("Failed to load dataset")?;

    match page {
        ReportPage::Yearly => print_json(&yearly_report(&dataset.yearly)),
        ReportPage::Climate => {
            let year = match year.or_else(|| dataset.climate.years().last().copied()) {
                Some(year) => year,
                None => bail!("The dataset has no climate data"),
            };
            let month = month
                .or_else(|| dataset.climate.months(year).first().copied())
                .unwrap_or(1);
            debug!("Climate report for {}-{:02}", year, month);
            print_json(&climate_report(&dataset, year, month)?)
        }
        ReportPage::Monthly => {
            let Some(month) = month else {
                bail!("The monthly report needs --month");
            };
            print_json(&monthly_page(&dataset, month)?)
        }
        ReportPage::Categories => print_json(&category_report(&dataset)?),
        ReportPage::Taxonomy => print_json(&taxonomy_options(&dataset.taxonomy, None)),
    }
}
