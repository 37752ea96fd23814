//! Page computations of the sales dashboard.
//!
//! Every function here is a pure transform from the model records (or a
//! remote payload) into the chart-ready shapes defined in `common`.

pub mod aggregate;
pub mod category;
pub mod climate;
pub mod details;
pub mod error;
pub mod investment;
pub mod monthly;
pub mod yearly;

pub use error::{ComputeError, Result};
