use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{Result, parse_month, parse_year};

/// Product categories sold on the dashboard, in display order.
pub const CATEGORIES: [&str; 5] = [
    "Camera",
    "CameraAccessory",
    "EntertainmentSmall",
    "GameCDDVD",
    "GamingHardware",
];

/// Historical discount percentage per category, keyed by `YYYY-MM`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CategoryDiscountTable {
    months: BTreeMap<String, BTreeMap<String, f64>>,
}

impl CategoryDiscountTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        for key in table.months.keys() {
            let (year, month) = key.split_once('-').unwrap_or((key.as_str(), ""));
            parse_year(year)?;
            parse_month(month)?;
        }
        Ok(table)
    }

    /// Discount for the category in the given month, if recorded.
    pub fn discount(&self, year: i32, month: u32, category: &str) -> Option<f64> {
        self.months
            .get(&Self::key(year, month))
            .and_then(|categories| categories.get(category))
            .copied()
    }

    pub fn key(year: i32, month: u32) -> String {
        format!("{year}-{month:02}")
    }
}
