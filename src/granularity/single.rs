//! One-level granularities: a unit's position within the unit directly above it.
use super::column::GranularityColumn;
use crate::error::{GranularityError, Result};
use crate::hierarchy::{convert, HierarchyTable};

/// A raw index value that can be counted off in whole base-unit multiples.
pub trait IndexValue: Copy + Send + Sync {
    /// `ceil(self / scale)`, or an error when the count has no `i64` form.
    fn units_elapsed(self, scale: u64, row: usize) -> Result<i64>;
}

impl IndexValue for i64 {
    fn units_elapsed(self, scale: u64, row: usize) -> Result<i64> {
        let (value, scale) = (i128::from(self), i128::from(scale));
        let floor = value.div_euclid(scale);
        let count = if value.rem_euclid(scale) == 0 { floor } else { floor + 1 };
        i64::try_from(count).map_err(|_| GranularityError::IndexOutOfRange { row })
    }
}

impl IndexValue for f64 {
    fn units_elapsed(self, scale: u64, row: usize) -> Result<i64> {
        if !self.is_finite() {
            return Err(GranularityError::NonFiniteIndex { row });
        }
        let count = (self / scale as f64).ceil();
        // i64::MAX rounds up to 2^63 as a float, which is already out of range.
        if count < i64::MIN as f64 || count >= i64::MAX as f64 {
            return Err(GranularityError::IndexOutOfRange { row });
        }
        Ok(count as i64)
    }
}

/// Whole `lgran` units elapsed up to and including each row.
///
/// Index values are measured in base units; dividing by the base-to-`lgran`
/// scale and rounding up gives a non-decreasing count for an ordered index.
/// Integer indices are divided exactly, so values past 2^53 keep their position.
pub fn linearize<T: IndexValue>(index: &[T], lgran: &str, table: &HierarchyTable) -> Result<Vec<i64>> {
    let scale = table.scale_from_base(lgran)?;
    index
        .iter()
        .enumerate()
        .map(|(row, &value)| value.units_elapsed(scale, row))
        .collect()
}

/// Wraps linear counts into `1..=denom`; an exact multiple maps to `denom`.
pub fn circularize(linear: &[i64], denom: u64) -> Vec<u64> {
    let denom = i128::from(denom);
    linear
        .iter()
        .map(|&count| match i128::from(count).rem_euclid(denom) {
            0 => denom as u64,
            r => r as u64,
        })
        .collect()
}

/// Position of each row's `lgran` within the next coarser unit.
pub fn build_single<T: IndexValue>(index: &[T], lgran: &str, table: &HierarchyTable) -> Result<GranularityColumn> {
    let next = table
        .next_coarser(lgran)?
        .ok_or_else(|| GranularityError::NoCoarserUnit {
            unit: lgran.to_string(),
        })?;
    let denom = convert(lgran, next.as_str(), table)?;
    let linear = linearize(index, lgran, table)?;
    Ok(GranularityColumn::new(circularize(&linear, denom), denom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cricket() -> HierarchyTable {
        HierarchyTable::new(["ball", "over", "inning", "match"], [1, 6, 20, 2]).unwrap()
    }

    fn seq(n: usize) -> Vec<f64> {
        (1..=n).map(|v| v as f64).collect()
    }

    #[rstest]
    #[case(2)]
    #[case(6)]
    #[case(7)]
    fn test_three_full_cycles(#[case] f: u64) {
        let table = HierarchyTable::new(["a", "b"], [1, f]).unwrap();
        let out = build_single(&seq(3 * f as usize), "a", &table).unwrap();
        let expected: Vec<u64> = (0..3).flat_map(|_| 1..=f).collect();
        assert_eq!(out.values(), expected.as_slice());
        assert_eq!(out.size(), f);
    }

    #[test]
    fn test_linearize_rounds_up_to_whole_units() {
        let linear = linearize(&[1.0, 6.0, 7.0, 12.0, 13.0], "over", &cricket()).unwrap();
        assert_eq!(linear, vec![1, 1, 2, 2, 3]);
    }

    #[rstest]
    #[case(vec![20, 40, 21], 20, vec![20, 20, 1])]
    #[case(vec![0, -1, -20], 20, vec![20, 19, 20])]
    #[case(vec![5], 1, vec![1])]
    fn test_circularize_never_yields_zero(
        #[case] linear: Vec<i64>,
        #[case] denom: u64,
        #[case] expected: Vec<u64>,
    ) {
        assert_eq!(circularize(&linear, denom), expected);
    }

    #[test]
    fn test_ball_over_cycles_every_six() {
        let out = build_single(&seq(12), "ball", &cricket()).unwrap();
        assert_eq!(out.values(), [1, 2, 3, 4, 5, 6, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_coarsest_unit_has_no_single_level() {
        assert!(matches!(
            build_single(&seq(3), "match", &cricket()),
            Err(GranularityError::NoCoarserUnit { .. })
        ));
    }

    #[test]
    fn test_non_finite_index_is_rejected() {
        let err = build_single(&[1.0, f64::NAN], "ball", &cricket()).unwrap_err();
        assert!(matches!(err, GranularityError::NonFiniteIndex { row: 1 }));
    }

    #[test]
    fn test_integer_index_is_exact_past_f64_precision() {
        let table = HierarchyTable::new(["ns", "pair"], [1, 2]).unwrap();
        let big = 1i64 << 53;
        let index = [big + 1, big + 2, big + 3, i64::MAX];
        assert_eq!(linearize(&index, "ns", &table).unwrap(), index.to_vec());
        assert_eq!(build_single(&index, "ns", &table).unwrap().values(), [1, 2, 1, 1]);
    }

    #[test]
    fn test_integer_linearize_rounds_up_below_zero() {
        let linear = linearize(&[-7i64, -6, 0, 7, 12], "over", &cricket()).unwrap();
        assert_eq!(linear, vec![-1, -1, 0, 2, 2]);
    }

    #[rstest]
    #[case(1e19)]
    #[case(-1e19)]
    #[case(9_223_372_036_854_775_807.0)]
    fn test_float_index_out_of_range_is_rejected(#[case] value: f64) {
        let err = build_single(&[1.0, value], "ball", &cricket()).unwrap_err();
        assert!(matches!(err, GranularityError::IndexOutOfRange { row: 1 }));
    }
}
