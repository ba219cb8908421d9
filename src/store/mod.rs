//! Columnar storage for the caller's dataset.
pub mod dataset;
pub mod types;

pub use dataset::Dataset;
pub use types::{CalendarResolution, Categorical, Column, ColumnData};
