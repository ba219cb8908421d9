use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A factor-like column: ordered labels plus one 1-indexed code per row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorical {
    levels: Vec<String>,
    codes: Vec<usize>,
}

impl Categorical {
    /// Builds a column from explicit levels. Returns `None` if any code falls
    /// outside `1..=levels.len()`.
    pub fn new(levels: Vec<String>, codes: Vec<usize>) -> Option<Self> {
        if codes.iter().all(|&c| c >= 1 && c <= levels.len()) {
            Some(Self { levels, codes })
        } else {
            None
        }
    }

    /// Observed distinct values become the levels, in ascending order.
    pub fn from_integers(values: &[i64]) -> Self {
        let distinct: Vec<i64> = values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let codes = values
            .iter()
            .map(|v| distinct.binary_search(v).map_or(0, |i| i + 1))
            .collect();
        Self {
            levels: distinct.iter().map(i64::to_string).collect(),
            codes,
        }
    }

    pub fn from_floats(values: &[f64]) -> Self {
        let mut distinct: Vec<f64> = values.to_vec();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup_by(|a, b| a.total_cmp(b).is_eq());
        let codes = values
            .iter()
            .map(|v| distinct.binary_search_by(|d| d.total_cmp(v)).map_or(0, |i| i + 1))
            .collect();
        Self {
            levels: distinct.iter().map(f64::to_string).collect(),
            codes,
        }
    }

    pub fn from_text(values: &[String]) -> Self {
        let distinct: Vec<&String> = values.iter().collect::<BTreeSet<_>>().into_iter().collect();
        let codes = values
            .iter()
            .map(|v| distinct.binary_search(&v).map_or(0, |i| i + 1))
            .collect();
        Self {
            levels: distinct.into_iter().cloned().collect(),
            codes,
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    #[inline]
    pub fn label(&self, row: usize) -> &str {
        &self.levels[self.codes[row] - 1]
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.codes.iter().map(|&c| self.levels[c - 1].as_str())
    }
}

/// How fine a calendar index is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CalendarResolution {
    DateTime,
    Date,
    Week,
    Month,
    Quarter,
}

/// The typed storage of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
    Categorical(Categorical),
    Date(Vec<NaiveDate>),
    DateTime(Vec<NaiveDateTime>),
    /// Week periods, each stored as the first day of its week.
    YearWeek(Vec<NaiveDate>),
    /// Month periods, each stored as the first day of its month.
    YearMonth(Vec<NaiveDate>),
    /// Quarter periods, each stored as the first day of its quarter.
    YearQuarter(Vec<NaiveDate>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Integer(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Categorical(c) => c.len(),
            Self::Date(v) | Self::YearWeek(v) | Self::YearMonth(v) | Self::YearQuarter(v) => v.len(),
            Self::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Categorical(_) => "categorical",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::YearWeek(_) => "yearweek",
            Self::YearMonth(_) => "yearmonth",
            Self::YearQuarter(_) => "yearquarter",
        }
    }

    /// Resolution of a calendar-typed column; `None` for everything else.
    pub fn calendar_resolution(&self) -> Option<CalendarResolution> {
        match self {
            Self::DateTime(_) => Some(CalendarResolution::DateTime),
            Self::Date(_) => Some(CalendarResolution::Date),
            Self::YearWeek(_) => Some(CalendarResolution::Week),
            Self::YearMonth(_) => Some(CalendarResolution::Month),
            Self::YearQuarter(_) => Some(CalendarResolution::Quarter),
            _ => None,
        }
    }

    /// Timestamps of a calendar column, periods mapped to their first instant.
    pub fn as_timestamps(&self) -> Option<Vec<NaiveDateTime>> {
        match self {
            Self::DateTime(v) => Some(v.clone()),
            Self::Date(v) | Self::YearWeek(v) | Self::YearMonth(v) | Self::YearQuarter(v) => {
                Some(v.iter().map(|d| d.and_time(chrono::NaiveTime::MIN)).collect())
            }
            _ => None,
        }
    }

    /// Reads each row as an integer position. `None` if any row cannot be read
    /// that way (non-integral float, unparsable label, calendar value).
    pub fn as_positions(&self) -> Option<Vec<i64>> {
        match self {
            Self::Integer(v) => Some(v.clone()),
            Self::Float(v) => v
                .iter()
                .map(|&x| (x.is_finite() && x.fract() == 0.0).then_some(x as i64))
                .collect(),
            Self::Text(v) => v.iter().map(|s| s.trim().parse().ok()).collect(),
            Self::Categorical(c) => c.labels().map(|s| s.trim().parse().ok()).collect(),
            _ => None,
        }
    }

    /// Reinterprets the column as categorical without changing any value.
    pub fn to_categorical(&self) -> Categorical {
        match self {
            Self::Integer(v) => Categorical::from_integers(v),
            Self::Float(v) => Categorical::from_floats(v),
            Self::Text(v) => Categorical::from_text(v),
            Self::Categorical(c) => c.clone(),
            Self::DateTime(v) => Categorical::from_text(&v.iter().map(|t| t.to_string()).collect::<Vec<_>>()),
            Self::Date(v) | Self::YearWeek(v) | Self::YearMonth(v) | Self::YearQuarter(v) => {
                Categorical::from_text(&v.iter().map(|d| d.to_string()).collect::<Vec<_>>())
            }
        }
    }
}

/// A named column of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self { name: name.into(), data }
    }
}
