use polars::error::PolarsError;
use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the dataset or calendar records
    #[error("Model error: {0}")]
    Model(#[from] model::ModelError),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Error from Polars Series operations
    #[error("Series error: {0}")]
    Series(String),

    /// Requested month, year or category is not in the dataset
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller supplied a value outside the accepted range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from decimal operations
    #[error("Decimal error: {0}")]
    Decimal(String),
}

impl From<PolarsError> for ComputeError {
    fn from(error: PolarsError) -> Self {
        let kind = match &error {
            PolarsError::NoData(_) => Some("no data"),
            PolarsError::ShapeMismatch(_) => Some("shape mismatch"),
            PolarsError::SchemaMismatch(_) => Some("schema mismatch"),
            PolarsError::ColumnNotFound(_) => Some("column not found"),
            _ => None,
        };
        let err = match kind {
            Some(kind) => ComputeError::DataFrame(format!("{}: {}", kind, error)),
            None => ComputeError::Series(error.to_string()),
        };
        error!(?err, "Rollup failed");
        err
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
