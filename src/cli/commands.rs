pub mod details;
pub mod predict;
pub mod report;
pub mod serve;

pub use details::details;
pub use predict::predict;
pub use report::report;
pub use serve::serve;
