//! Granularities for date and date-time indices.
//!
//! Calendar data does not need a user hierarchy: units from seconds to years
//! are built in, and positions are computed from wall-clock timestamps.
pub mod adapter;
pub mod labels;
pub mod unit;

pub use adapter::{build_calendar, CalendarGranularity};
pub use unit::CalendarUnit;
