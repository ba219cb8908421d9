//! The fixed calendar hierarchy used for date and date-time indices.
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;

/// Calendar units, finest first. The derived ordering is the hierarchy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    Second,
    Minute,
    /// Quarter of an hour.
    QHour,
    /// Half of an hour.
    HHour,
    Hour,
    Day,
    Week,
    Fortnight,
    Month,
    Quarter,
    Semester,
    Year,
}

impl CalendarUnit {
    pub const ALL: [CalendarUnit; 12] = [
        Self::Second,
        Self::Minute,
        Self::QHour,
        Self::HHour,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Fortnight,
        Self::Month,
        Self::Quarter,
        Self::Semester,
        Self::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::QHour => "qhour",
            Self::HHour => "hhour",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Fortnight => "fortnight",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Semester => "semester",
            Self::Year => "year",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|u| u.name()).collect()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.name() == name)
    }

    /// Length in seconds for units of constant duration.
    pub fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Second => Some(1),
            Self::Minute => Some(60),
            Self::QHour => Some(15 * 60),
            Self::HHour => Some(30 * 60),
            Self::Hour => Some(3_600),
            Self::Day => Some(SECONDS_PER_DAY),
            Self::Week => Some(7 * SECONDS_PER_DAY),
            Self::Fortnight => Some(14 * SECONDS_PER_DAY),
            _ => None,
        }
    }

    /// Length in months for month-based units.
    pub fn months(self) -> Option<i32> {
        match self {
            Self::Month => Some(1),
            Self::Quarter => Some(3),
            Self::Semester => Some(6),
            Self::Year => Some(12),
            _ => None,
        }
    }

    /// Longest possible length in days of a month-based unit.
    fn max_days(self) -> i64 {
        match self {
            Self::Month => 31,
            Self::Quarter => 92,
            Self::Semester => 184,
            _ => 366,
        }
    }

    /// Start of the `self` unit containing `t`.
    pub fn floor(self, t: NaiveDateTime, week_start: Weekday) -> NaiveDateTime {
        let date = t.date();
        let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN);
        let at_minute = |m: u32| date.and_time(NaiveTime::MIN) + Duration::hours(t.hour() as i64) + Duration::minutes(m as i64);

        match self {
            Self::Second => t.with_nanosecond(0).unwrap_or(t),
            Self::Minute => at_minute(t.minute()),
            Self::QHour => at_minute(t.minute() - t.minute() % 15),
            Self::HHour => at_minute(t.minute() - t.minute() % 30),
            Self::Hour => at_minute(0),
            Self::Day => midnight(date),
            Self::Week => midnight(week_floor(date, week_start)),
            Self::Fortnight => midnight(fortnight_floor(date, week_start)),
            Self::Month | Self::Quarter | Self::Semester | Self::Year => {
                let span = self.months().unwrap_or(1) as u32;
                let month0 = date.month0() - date.month0() % span;
                let first = NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1).unwrap_or(date);
                midnight(first)
            }
        }
    }

    /// Largest position `self` can take within `coarse`.
    ///
    /// Exact when both units have constant length or both are month-based;
    /// otherwise the bound for the longest coarse unit (31-day month, leap year).
    pub fn nominal_size(self, coarse: CalendarUnit) -> u64 {
        match (self.fixed_seconds(), coarse.fixed_seconds(), self.months(), coarse.months()) {
            (Some(fine), Some(coarse), _, _) => (coarse / fine) as u64,
            (_, _, Some(fine), Some(coarse)) => (coarse / fine) as u64,
            (Some(fine), None, _, _) => {
                let span = coarse.max_days() * SECONDS_PER_DAY;
                ((span + fine - 1) / fine) as u64
            }
            // A month-based unit is never finer than a fixed one.
            _ => 1,
        }
    }
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn days_since_week_start(date: NaiveDate, week_start: Weekday) -> i64 {
    let day = date.weekday().num_days_from_monday() as i64;
    let start = week_start.num_days_from_monday() as i64;
    (day - start).rem_euclid(7)
}

fn week_floor(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    date - Duration::days(days_since_week_start(date, week_start))
}

/// Fortnights are counted from the first week start on or after 1970-01-01.
fn fortnight_floor(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    let anchor = epoch + Duration::days((7 - days_since_week_start(epoch, week_start)) % 7);
    let week = week_floor(date, week_start);
    let weeks = (week - anchor).num_days().div_euclid(7);
    if weeks.rem_euclid(2) == 1 {
        week - Duration::days(7)
    } else {
        week
    }
}
