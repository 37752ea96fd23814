//! Loading of the dashboard dataset.
//!
//! Every fixture is compiled into the binary. When a fixture directory is
//! configured, any file present there replaces the embedded copy of the same
//! name; missing files fall back to the embedded data.

use std::path::Path;
use tracing::{debug, info};

use crate::day_record::{CategorySeries, ClimateSeries};
use crate::discounts::CategoryDiscountTable;
use crate::error::{ModelError, Result};
use crate::monthly::MonthlyTable;
use crate::taxonomy::Taxonomy;
use crate::yearly::YearlyBreakdown;

pub const CLIMATE_FILE: &str = "climate.json";
pub const ANALYTICS_FILE: &str = "analytics.json";
pub const MONTHLY_FILE: &str = "monthly.json";
pub const YEARLY_FILE: &str = "yearly.json";
pub const DISCOUNTS_FILE: &str = "category_discounts.json";
pub const TAXONOMY_FILE: &str = "taxonomy.csv";

const EMBEDDED_CLIMATE: &str = include_str!("../data/climate.json");
const EMBEDDED_ANALYTICS: &str = include_str!("../data/analytics.json");
const EMBEDDED_MONTHLY: &str = include_str!("../data/monthly.json");
const EMBEDDED_YEARLY: &str = include_str!("../data/yearly.json");
const EMBEDDED_DISCOUNTS: &str = include_str!("../data/category_discounts.json");
const EMBEDDED_TAXONOMY: &str = include_str!("../data/taxonomy.csv");

/// All records the dashboard pages are computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub climate: ClimateSeries,
    pub analytics: CategorySeries,
    pub monthly: MonthlyTable,
    pub yearly: YearlyBreakdown,
    pub discounts: CategoryDiscountTable,
    pub taxonomy: Taxonomy,
}

impl Dataset {
    /// Dataset built from the fixtures compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::load(None)
    }

    /// Loads the dataset, preferring files found in `dir`.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let dataset = Self {
            climate: ClimateSeries::from_json(&read(dir, CLIMATE_FILE, EMBEDDED_CLIMATE)?)?,
            analytics: CategorySeries::from_json(&read(dir, ANALYTICS_FILE, EMBEDDED_ANALYTICS)?)?,
            monthly: MonthlyTable::from_json(&read(dir, MONTHLY_FILE, EMBEDDED_MONTHLY)?)?,
            yearly: YearlyBreakdown::from_json(&read(dir, YEARLY_FILE, EMBEDDED_YEARLY)?)?,
            discounts: CategoryDiscountTable::from_json(&read(
                dir,
                DISCOUNTS_FILE,
                EMBEDDED_DISCOUNTS,
            )?)?,
            taxonomy: Taxonomy::parse(&read(dir, TAXONOMY_FILE, EMBEDDED_TAXONOMY)?)?,
        };

        info!(
            "Loaded dataset: {} climate years, {} categories, {} monthly snapshots",
            dataset.climate.years().len(),
            dataset.analytics.categories().len(),
            dataset.monthly.snapshots().len()
        );
        Ok(dataset)
    }
}

fn read(dir: Option<&Path>, name: &str, embedded: &str) -> Result<String> {
    if let Some(dir) = dir {
        let path = dir.join(name);
        if path.is_file() {
            debug!("Reading fixture override {}", path.display());
            return std::fs::read_to_string(&path).map_err(|source| ModelError::Io { path, source });
        }
    }
    Ok(embedded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_dataset_loads() {
        let dataset = Dataset::embedded().unwrap();

        assert!(dataset.climate.has_year(2024));
        assert_eq!(dataset.analytics.categories().len(), 5);
        assert_eq!(dataset.monthly.snapshots().len(), 12);
        assert_eq!(dataset.yearly.monthly_gmv.len(), 12);
        assert!(dataset.discounts.discount(2023, 7, "Camera").is_some());
        assert!(dataset.taxonomy.categories().contains(&"Camera"));
    }

    #[test]
    fn test_directory_file_overrides_embedded_copy() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(TAXONOMY_FILE),
            "super_category,category,sub_category,vertical\nCE,Drones,Quadcopter,FPV\n",
        )
        .unwrap();

        let dataset = Dataset::load(Some(dir.path())).unwrap();

        assert_eq!(dataset.taxonomy.categories(), vec!["Drones"]);
        // files absent from the directory still come from the binary
        assert_eq!(dataset.monthly.snapshots().len(), 12);
    }

    #[test]
    fn test_broken_override_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MONTHLY_FILE), "{not json").unwrap();

        assert!(matches!(
            Dataset::load(Some(dir.path())),
            Err(ModelError::Json(_))
        ));
    }
}
