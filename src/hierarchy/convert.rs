//! Cumulative conversion factors between units.
use super::order::ascending_order;
use super::table::HierarchyTable;
use crate::error::Result;

/// Number of `lgran` units in one `ugran`: the product of the adjacent
/// factors on the path from `lgran` (exclusive) to `ugran` (inclusive).
pub fn convert(lgran: &str, ugran: &str, table: &HierarchyTable) -> Result<u64> {
    ascending_order(lgran, ugran, table)?;
    let lower = table.position(lgran)?;
    let upper = table.position(ugran)?;
    Ok(factor_between(table, lower, upper))
}

/// Unchecked product over `(lower, upper]`; callers guarantee `lower <= upper`.
#[inline]
pub(crate) fn factor_between(table: &HierarchyTable, lower: usize, upper: usize) -> u64 {
    (lower + 1..=upper).map(|pos| table.factor_at(pos)).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GranularityError;
    use rstest::rstest;

    fn table() -> HierarchyTable {
        HierarchyTable::new(["ball", "over", "inning", "match"], [1, 6, 20, 2]).unwrap()
    }

    #[rstest]
    #[case("ball", "over", 6)]
    #[case("over", "inning", 20)]
    #[case("inning", "match", 2)]
    #[case("ball", "inning", 120)]
    #[case("over", "match", 40)]
    #[case("ball", "match", 240)]
    fn test_telescoping_product(#[case] lower: &str, #[case] upper: &str, #[case] expected: u64) {
        assert_eq!(convert(lower, upper, &table()).unwrap(), expected);
    }

    #[rstest]
    #[case("over", "over")]
    #[case("match", "ball")]
    fn test_requires_ascending_pair(#[case] lower: &str, #[case] upper: &str) {
        assert!(matches!(
            convert(lower, upper, &table()),
            Err(GranularityError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn test_composes_across_midpoint() {
        let t = table();
        let direct = convert("ball", "match", &t).unwrap();
        let split = convert("ball", "inning", &t).unwrap() * convert("inning", "match", &t).unwrap();
        assert_eq!(direct, split);
    }
}
