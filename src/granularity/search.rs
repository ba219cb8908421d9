//! Enumerates the granularities a hierarchy can produce.
use super::name::GranularitySpec;
use crate::hierarchy::HierarchyTable;

/// Every `(units[i], units[j])` with `i < j`, finest pairs first.
pub fn derivable_pairs(table: &HierarchyTable) -> Vec<GranularitySpec> {
    let units = table.units();
    units
        .iter()
        .enumerate()
        .flat_map(|(i, fine)| {
            units[i + 1..]
                .iter()
                .map(move |coarse| GranularitySpec::new(fine.as_str(), coarse.as_str()))
        })
        .collect()
}

pub fn is_derivable(spec: &GranularitySpec, table: &HierarchyTable) -> bool {
    match (table.position(&spec.fine), table.position(&spec.coarse)) {
        (Ok(lower), Ok(upper)) => lower < upper,
        _ => false,
    }
}
