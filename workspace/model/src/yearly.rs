use serde::Deserialize;

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub gmv: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthValue {
    pub year: i32,
    pub month: u32,
    pub gmv: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthProductSplit {
    pub year: i32,
    pub month: u32,
    pub luxury: f64,
    pub mass_market: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Kpi {
    pub title: String,
    pub value: String,
}

/// Figures for the yearly analysis page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct YearlyBreakdown {
    pub payment_types: Vec<NamedValue>,
    pub product_types: Vec<NamedValue>,
    pub monthly_gmv: Vec<MonthValue>,
    pub monthly_by_product_type: Vec<MonthProductSplit>,
    pub kpis: Vec<Kpi>,
}

impl YearlyBreakdown {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut breakdown: Self = serde_json::from_str(json)?;

        let months = breakdown
            .monthly_gmv
            .iter()
            .map(|m| m.month)
            .chain(breakdown.monthly_by_product_type.iter().map(|m| m.month));
        for month in months {
            if !(1..=12).contains(&month) {
                return Err(ModelError::InvalidPeriod(month.to_string()));
            }
        }

        breakdown.monthly_gmv.sort_by_key(|m| (m.year, m.month));
        breakdown
            .monthly_by_product_type
            .sort_by_key(|m| (m.year, m.month));
        Ok(breakdown)
    }
}
