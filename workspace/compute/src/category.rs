use common::{
    CategoryMonth, CategoryOptions, CategoryReport, CategorySummary, SubcategoryOptions,
    SubcategorySummary, TaxonomyOptions, VerticalUnits, format_thousands, month_label,
    round_half_up, round_to,
};
use model::day_record::CategorySeries;
use model::fixtures::Dataset;
use model::taxonomy::Taxonomy;
use tracing::{debug, instrument};

use crate::aggregate::monthly_rollup;
use crate::error::Result;
use crate::monthly::{daily_sales, special_days};

/// Split applied to a subcategory that has no verticals in the taxonomy.
const FALLBACK_VERTICALS: [(&str, f64); 2] = [("Default", 0.6), ("Other", 0.4)];

fn subcategory_summaries(
    taxonomy: &Taxonomy,
    category: &str,
    total_gmv: f64,
) -> Vec<SubcategorySummary> {
    let names = taxonomy.subcategories(category);
    if names.is_empty() {
        return Vec::new();
    }
    let units = round_half_up(total_gmv / names.len() as f64 / 1000.0);

    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let vertical_names = taxonomy.verticals(category, name);
            let verticals = if vertical_names.is_empty() {
                FALLBACK_VERTICALS
                    .iter()
                    .map(|(vertical, weight)| VerticalUnits {
                        name: vertical.to_string(),
                        units: round_half_up(units * weight) as i64,
                    })
                    .collect()
            } else {
                let each = round_half_up(units / vertical_names.len() as f64) as i64;
                vertical_names
                    .iter()
                    .map(|vertical| VerticalUnits {
                        name: vertical.to_string(),
                        units: each,
                    })
                    .collect()
            };

            SubcategorySummary {
                id: index + 1,
                name: name.to_string(),
                units: units as i64,
                verticals,
            }
        })
        .collect()
}

/// One summary per category of the sales series, numbered from 1.
pub fn category_summaries(
    series: &CategorySeries,
    taxonomy: &Taxonomy,
) -> Result<Vec<CategorySummary>> {
    series
        .iter()
        .enumerate()
        .map(|(index, (name, days))| {
            let total_gmv: f64 = days.iter().map(|d| d.gmv()).sum();
            debug!("Category {} has {} days, GMV {:.2}", name, days.len(), total_gmv);

            let monthly = monthly_rollup(days)?
                .into_iter()
                .map(|total| CategoryMonth {
                    label: month_label(total.year, total.month),
                    year: total.year,
                    month: total.month,
                    gmv: round_to(total.gmv, 2),
                    mrp: round_to(total.mrp, 2),
                    days: total.days,
                })
                .collect();

            Ok(CategorySummary {
                id: index + 1,
                name: name.to_string(),
                total_gmv,
                units: round_half_up(total_gmv / 1000.0) as i64,
                total_sales: format_thousands(total_gmv, "$"),
                daily_sales: daily_sales(days),
                monthly,
                subcategories: subcategory_summaries(taxonomy, name, total_gmv),
            })
        })
        .collect()
}

#[instrument(skip(dataset))]
pub fn category_report(dataset: &Dataset) -> Result<CategoryReport> {
    Ok(CategoryReport {
        categories: category_summaries(&dataset.analytics, &dataset.taxonomy)?,
        special_days: special_days(),
    })
}

/// Filter options of the details page, optionally limited to one category.
pub fn taxonomy_options(taxonomy: &Taxonomy, category: Option<&str>) -> TaxonomyOptions {
    let categories = taxonomy
        .nodes()
        .iter()
        .filter(|node| category.is_none_or(|name| node.name == name))
        .map(|node| CategoryOptions {
            name: node.name.clone(),
            subcategories: node
                .subcategories
                .iter()
                .map(|sub| SubcategoryOptions {
                    name: sub.name.clone(),
                    verticals: sub.verticals.clone(),
                })
                .collect(),
        })
        .collect();
    TaxonomyOptions { categories }
}
