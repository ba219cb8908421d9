//! Builds granularities for calendar-typed indices from the built-in hierarchy.
use super::labels::labels_for;
use super::unit::CalendarUnit;
use crate::config::GranularityOptions;
use crate::error::{GranularityError, OrderViolation, Result};
use crate::granularity::{GranularityColumn, GranularitySpec};
use crate::store::CalendarResolution;
use chrono::{Datelike, NaiveDateTime, Weekday};

/// A validated calendar unit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGranularity {
    pub fine: CalendarUnit,
    pub coarse: CalendarUnit,
}

impl CalendarGranularity {
    /// Parses `"<fine>_<coarse>"` against the calendar units and checks order.
    pub fn parse(name: &str) -> Result<Self> {
        let spec = GranularitySpec::parse(name, CalendarUnit::names().as_slice())?;
        let unit = |n: &str| {
            CalendarUnit::from_name(n).ok_or_else(|| GranularityError::InvalidUnit {
                unit: n.to_string(),
                known: CalendarUnit::names().iter().map(|s| s.to_string()).collect(),
            })
        };
        let fine = unit(&spec.fine)?;
        let coarse = unit(&spec.coarse)?;

        let violation = if fine == coarse {
            OrderViolation::Identical
        } else if fine > coarse {
            OrderViolation::Reversed
        } else {
            return Ok(Self { fine, coarse });
        };
        Err(GranularityError::InvalidOrder {
            lower: spec.fine,
            upper: spec.coarse,
            violation,
        })
    }

    /// 1-indexed position of `t`'s fine unit within its coarse unit.
    pub fn position(&self, t: NaiveDateTime, week_start: Weekday) -> u64 {
        let start = self.coarse.floor(t, week_start);
        let elapsed = match (self.fine.months(), self.fine.fixed_seconds()) {
            (Some(span), _) => (month_index(t) - month_index(start)) / span as i64,
            (None, Some(secs)) => (t - start).num_seconds().div_euclid(secs),
            (None, None) => 0,
        };
        elapsed.max(0) as u64 + 1
    }
}

fn month_index(t: NaiveDateTime) -> i64 {
    t.year() as i64 * 12 + t.month0() as i64
}

/// The finest unit an index of the given resolution can speak about.
fn finest_unit(resolution: CalendarResolution) -> CalendarUnit {
    match resolution {
        CalendarResolution::DateTime => CalendarUnit::Second,
        CalendarResolution::Date => CalendarUnit::Day,
        CalendarResolution::Week => CalendarUnit::Week,
        CalendarResolution::Month => CalendarUnit::Month,
        CalendarResolution::Quarter => CalendarUnit::Quarter,
    }
}

/// Computes `name` for every timestamp.
///
/// Periods (weeks, months, quarters) are passed as their first instant, and
/// asking them for a unit finer than their own resolution is an error.
pub fn build_calendar(
    timestamps: &[NaiveDateTime],
    resolution: CalendarResolution,
    name: &str,
    options: &GranularityOptions,
) -> Result<GranularityColumn> {
    let gran = CalendarGranularity::parse(name)?;
    let finest = finest_unit(resolution);
    if gran.fine < finest {
        return Err(GranularityError::UnitFinerThanIndex {
            unit: gran.fine.to_string(),
            resolution: finest.to_string(),
        });
    }

    let size = gran.fine.nominal_size(gran.coarse);
    let values = timestamps
        .iter()
        .map(|&t| gran.position(t, options.week_start).min(size))
        .collect();
    let column = GranularityColumn::new(values, size);

    Ok(match labels_for(gran.fine, gran.coarse, options) {
        Some(labels) => column.with_labels(labels),
        None => column,
    })
}
