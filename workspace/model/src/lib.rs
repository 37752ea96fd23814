//! Domain records of the sales dashboard: daily sales and weather series,
//! the product taxonomy, calendar events and the fixed monthly and yearly
//! tables the dashboard pages are built from.

pub mod calendar;
pub mod day_record;
pub mod discounts;
pub mod error;
pub mod fixtures;
pub mod monthly;
pub mod streams;
pub mod taxonomy;
pub mod yearly;

pub use error::{ModelError, Result};

// Re-export tracing for use in this crate
pub use tracing;
