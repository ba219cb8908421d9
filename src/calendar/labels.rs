//! Display names for calendar granularities that have conventional ones.
use super::unit::CalendarUnit;
use crate::config::GranularityOptions;
use chrono::{Month, Weekday};

/// Level names for `fine_coarse`, or `None` when positions are shown as numbers.
///
/// Only day-of-week and month-of-year carry names; weekdays are rotated so
/// the configured week start comes first.
pub fn labels_for(fine: CalendarUnit, coarse: CalendarUnit, options: &GranularityOptions) -> Option<Vec<String>> {
    if !options.label {
        return None;
    }
    match (fine, coarse) {
        (CalendarUnit::Day, CalendarUnit::Week) => {
            let mut day = options.week_start;
            let mut names = Vec::with_capacity(7);
            for _ in 0..7 {
                names.push(weekday_name(day, options.abbr));
                day = day.succ();
            }
            Some(names)
        }
        (CalendarUnit::Month, CalendarUnit::Year) => {
            let mut month = Month::January;
            let mut names = Vec::with_capacity(12);
            for _ in 0..12 {
                names.push(month_name(month, options.abbr));
                month = month.succ();
            }
            Some(names)
        }
        _ => None,
    }
}

fn weekday_name(day: Weekday, abbr: bool) -> String {
    let full = match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    shorten(full, abbr)
}

fn month_name(month: Month, abbr: bool) -> String {
    shorten(month.name(), abbr)
}

fn shorten(full: &str, abbr: bool) -> String {
    if abbr {
        full.chars().take(3).collect()
    } else {
        full.to_string()
    }
}
