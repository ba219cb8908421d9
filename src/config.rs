//! Caller-tunable options for granularity construction.
use crate::error::Result;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Options consumed by the calendar path; the hierarchy path ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GranularityOptions {
    /// First day of a week for week and fortnight boundaries.
    pub week_start: Weekday,
    /// Use names instead of numbers for day-of-week and month-of-year levels.
    pub label: bool,
    /// Three-letter names when `label` is set.
    pub abbr: bool,
}

impl Default for GranularityOptions {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            label: true,
            abbr: true,
        }
    }
}

impl GranularityOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
