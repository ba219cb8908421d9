use crate::error::{GranularityError, Result};
use crate::store::Categorical;

/// Positions of each row within a coarse unit, counted in fine-unit steps.
///
/// Every value lies in `1..=size`; `size` (the number of fine units in one
/// coarse unit) marks the last position, never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranularityColumn {
    values: Vec<u64>,
    size: u64,
    labels: Option<Vec<String>>,
}

impl GranularityColumn {
    pub(crate) fn new(values: Vec<u64>, size: u64) -> Self {
        debug_assert!(values.iter().all(|&v| v >= 1 && v <= size));
        Self { values, size, labels: None }
    }

    /// Attaches display names for positions `1..=labels.len()`.
    pub(crate) fn with_labels(mut self, labels: Vec<String>) -> Self {
        debug_assert_eq!(labels.len() as u64, self.size);
        self.labels = Some(labels);
        self
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<u64> {
        self.values
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts to a categorical column.
    ///
    /// Labelled columns keep the full ordered label set as levels; unlabelled
    /// ones use the observed positions, so "20" reads as 20 and sorts after "3".
    /// Fails if a position has no label.
    pub fn into_categorical(self) -> Result<Categorical> {
        match self.labels {
            Some(labels) => {
                let count = labels.len();
                let codes = self.values.iter().map(|&v| v as usize).collect();
                Categorical::new(labels, codes).ok_or(GranularityError::UnlabelledPosition {
                    size: self.size,
                    labels: count,
                })
            }
            None => {
                let positions: Vec<i64> = self.values.iter().map(|&v| v as i64).collect();
                Ok(Categorical::from_integers(&positions))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlabelled_levels_sort_numerically() {
        let cat = GranularityColumn::new(vec![3, 20, 3, 1], 20).into_categorical().unwrap();
        assert_eq!(cat.levels(), ["1", "3", "20"]);
        assert_eq!(cat.labels().collect::<Vec<_>>(), ["3", "20", "3", "1"]);
    }

    #[test]
    fn test_labelled_levels_keep_full_domain() {
        let labels = vec!["Jan".to_string(), "Feb".to_string(), "Mar".to_string()];
        let cat = GranularityColumn::new(vec![2, 2], 3).with_labels(labels).into_categorical().unwrap();
        assert_eq!(cat.levels().len(), 3);
        assert_eq!(cat.labels().collect::<Vec<_>>(), ["Feb", "Feb"]);
    }

    #[test]
    fn test_position_without_label_is_an_error() {
        let column = GranularityColumn {
            values: vec![1, 4],
            size: 4,
            labels: Some(vec!["Q1".into(), "Q2".into(), "Q3".into()]),
        };
        assert!(matches!(
            column.into_categorical(),
            Err(GranularityError::UnlabelledPosition { size: 4, labels: 3 })
        ));
    }
}
