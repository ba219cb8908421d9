//! Granularities for any ordered unit pair, built by peeling one level at a time.
use super::column::GranularityColumn;
use super::single::{build_single, IndexValue};
use crate::error::Result;
use crate::hierarchy::{ascending_order, convert, HierarchyTable, Span};
use log::trace;

/// Position of each row's `lgran` within its `ugran`, counted in `lgran` steps.
///
/// Adjacent pairs are answered directly. Otherwise, with `mid` the unit right
/// above `lgran`, the result is the mixed-radix combination
/// `low + step * (high - 1)` of `low = build(lgran, mid)`,
/// `high = build(mid, ugran)` and `step = convert(lgran, mid)`.
///
/// Fails before producing output on unknown units or an identical/reversed pair.
pub fn build<T: IndexValue>(
    index: &[T],
    lgran: &str,
    ugran: &str,
    table: &HierarchyTable,
) -> Result<GranularityColumn> {
    match ascending_order(lgran, ugran, table)? {
        Span::Adjacent => build_single(index, lgran, table),
        Span::MultiLevel { gap, next } => {
            let mid = next.as_str();
            trace!("splitting {}_{} (gap {}) at '{}'", lgran, ugran, gap, mid);

            let low = build(index, lgran, mid, table)?;
            let high = build(index, mid, ugran, table)?;
            let step = convert(lgran, mid, table)?;

            let values = low
                .values()
                .iter()
                .zip(high.values())
                .map(|(&l, &h)| l + step * (h - 1))
                .collect();
            Ok(GranularityColumn::new(values, step * high.size()))
        }
    }
}
