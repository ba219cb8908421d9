use super::types::{Column, ColumnData};
use crate::error::{GranularityError, Result};
use serde::{Deserialize, Serialize};

/// A caller-owned columnar table with an optional declared index column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    index: Option<String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let mut dataset = Self::new();
        for column in columns {
            dataset.add_column(column)?;
        }
        Ok(dataset)
    }

    pub fn with_index(mut self, name: &str) -> Result<Self> {
        self.set_index(name)?;
        Ok(self)
    }

    /// Declares `name` as the index. The column must already exist.
    pub fn set_index(&mut self, name: &str) -> Result<()> {
        if self.column(name).is_none() {
            return Err(GranularityError::MissingColumn {
                column: name.to_string(),
            });
        }
        self.index = Some(name.to_string());
        Ok(())
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index.as_deref()
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| GranularityError::MissingColumn {
            column: name.to_string(),
        })
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Appends a column. Its length must match the existing rows.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.contains_column(&column.name) {
            return Err(GranularityError::DuplicateColumn { column: column.name });
        }
        if !self.columns.is_empty() && column.data.len() != self.nrows() {
            return Err(GranularityError::LengthMismatch {
                column: column.name,
                expected: self.nrows(),
                found: column.data.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Swaps the storage of an existing column, keeping its position.
    pub fn replace_column_data(&mut self, name: &str, data: ColumnData) -> Result<()> {
        let expected = self.nrows();
        let slot = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| GranularityError::MissingColumn {
                column: name.to_string(),
            })?;
        if data.len() != expected {
            return Err(GranularityError::LengthMismatch {
                column: name.to_string(),
                expected,
                found: data.len(),
            });
        }
        slot.data = data;
        Ok(())
    }

    /// The declared index column, checked to be usable as an ordered index.
    ///
    /// An index is usable when it is numeric or calendar typed and its values
    /// never decrease from one row to the next.
    pub fn index_column(&self) -> Result<&Column> {
        let name = self.index.as_deref().ok_or_else(|| GranularityError::NotATimeSeries {
            reason: "no index column declared".into(),
        })?;
        let column = self.column(name).ok_or_else(|| GranularityError::NotATimeSeries {
            reason: format!("declared index '{}' is not a column", name),
        })?;

        let ordered = match &column.data {
            ColumnData::Integer(v) => v.windows(2).all(|w| w[0] <= w[1]),
            ColumnData::Float(v) => v.windows(2).all(|w| w[0] <= w[1]),
            ColumnData::DateTime(v) => v.windows(2).all(|w| w[0] <= w[1]),
            ColumnData::Date(v)
            | ColumnData::YearWeek(v)
            | ColumnData::YearMonth(v)
            | ColumnData::YearQuarter(v) => v.windows(2).all(|w| w[0] <= w[1]),
            other => {
                return Err(GranularityError::NotATimeSeries {
                    reason: format!("index '{}' has non-ordinal type {}", name, other.type_name()),
                })
            }
        };

        if !ordered {
            return Err(GranularityError::NotATimeSeries {
                reason: format!("index '{}' is not in ascending order", name),
            });
        }
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balls(n: i64) -> Column {
        Column::new("ball", ColumnData::Integer((1..=n).collect()))
    }

    #[test]
    fn test_rejects_duplicate_and_ragged_columns() {
        let mut ds = Dataset::from_columns([balls(3)]).unwrap();
        assert!(matches!(
            ds.add_column(balls(3)),
            Err(GranularityError::DuplicateColumn { .. })
        ));
        assert!(matches!(
            ds.add_column(Column::new("runs", ColumnData::Integer(vec![1, 2]))),
            Err(GranularityError::LengthMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_index_must_be_declared_and_ordered() {
        let ds = Dataset::from_columns([balls(3)]).unwrap();
        assert!(matches!(ds.index_column(), Err(GranularityError::NotATimeSeries { .. })));

        let ds = ds.with_index("ball").unwrap();
        assert_eq!(ds.index_column().unwrap().name, "ball");

        let shuffled = Dataset::from_columns([Column::new("ball", ColumnData::Integer(vec![2, 1]))])
            .unwrap()
            .with_index("ball")
            .unwrap();
        assert!(matches!(shuffled.index_column(), Err(GranularityError::NotATimeSeries { .. })));
    }

    #[test]
    fn test_text_index_is_not_a_time_series() {
        let ds = Dataset::from_columns([Column::new("id", ColumnData::Text(vec!["a".into()]))])
            .unwrap()
            .with_index("id")
            .unwrap();
        assert!(matches!(ds.index_column(), Err(GranularityError::NotATimeSeries { .. })));
    }

    #[test]
    fn test_duplicate_check_survives_serde() {
        let ds = Dataset::from_columns([balls(2)]).unwrap().with_index("ball").unwrap();
        let json = serde_json::to_string(&ds).unwrap();
        let mut back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ds);
        assert!(back.contains_column("ball"));
        assert!(matches!(
            back.add_column(balls(2)),
            Err(GranularityError::DuplicateColumn { .. })
        ));
    }
}
