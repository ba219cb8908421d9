//! Checks an existing labelled column against a freshly computed granularity.
use crate::error::{GranularityError, Result};
use crate::granularity::{build, is_derivable, GranularitySpec, IndexValue};
use crate::hierarchy::HierarchyTable;
use crate::store::ColumnData;
use log::debug;

/// Recomputes granularities over one hierarchy and compares them with
/// reference columns.
///
/// A mismatch is a normal `false` result; only an underivable granularity or
/// a failure to build it is an error.
pub struct GranularityValidator<'a> {
    table: &'a HierarchyTable,
}

impl<'a> GranularityValidator<'a> {
    /// Creates a new validator for the given hierarchy table.
    pub fn new(table: &'a HierarchyTable) -> Self {
        Self { table }
    }

    /// Returns `true` iff every row of `reference` equals the recomputed value.
    ///
    /// # Returns
    /// - `Ok(true)` if lengths agree and every row matches exactly.
    /// - `Ok(false)` on any difference, including rows that cannot be read as integers.
    /// - `Err(UnderivableGranularity)` if `spec` is not an ordered pair of the table's units.
    pub fn validate<T: IndexValue>(&self, index: &[T], reference: &ColumnData, spec: &GranularitySpec) -> Result<bool> {
        if !is_derivable(spec, self.table) {
            return Err(GranularityError::UnderivableGranularity { name: spec.name() });
        }

        let computed = build(index, &spec.fine, &spec.coarse, self.table)?;
        let Some(expected) = reference.as_positions() else {
            debug!("reference for {} is not integer-valued", spec);
            return Ok(false);
        };

        if expected.len() != computed.len() {
            debug!(
                "reference for {} has {} rows, computed {}",
                spec,
                expected.len(),
                computed.len()
            );
            return Ok(false);
        }

        let mismatch = computed
            .values()
            .iter()
            .zip(&expected)
            .position(|(&c, &e)| i64::try_from(c).map_or(true, |c| c != e));

        match mismatch {
            Some(row) => {
                debug!("{} differs from reference at row {}", spec, row);
                Ok(false)
            }
            None => Ok(true),
        }
    }
}
