use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for loading and validating dashboard records
#[derive(Error, Debug)]
pub enum ModelError {
    /// A fixture file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON fixture did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The taxonomy table could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A date string did not parse as `YYYY-MM-DD`
    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    /// A year or month key was not numeric or out of range
    #[error("Invalid period key '{0}'")]
    InvalidPeriod(String),

    /// A date range ends before it starts
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A category name that is not part of the taxonomy
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// Type alias for Result with ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ModelError::InvalidDate(value.to_string()))
}

pub(crate) fn parse_month(value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(month),
        _ => Err(ModelError::InvalidPeriod(value.to_string())),
    }
}

pub(crate) fn parse_year(value: &str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| ModelError::InvalidPeriod(value.to_string()))
}
