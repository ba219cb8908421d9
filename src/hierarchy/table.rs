//! The user-declared ladder of nested units and their conversion factors.
use crate::error::{GranularityError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt;

/// A named level in a hierarchy (e.g. "over", "inning").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit(pub String);

impl Unit {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The serialised shape of a hierarchy: two parallel arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawHierarchy {
    units: Vec<String>,
    factors: Vec<u64>,
}

/// Ordered units, finest first, with per-unit conversion factors.
///
/// `factors[i]` (i > 0) is the number of `units[i - 1]` that make up one
/// `units[i]`. `factors[0]` carries no meaning and is stored as 1.
///
/// The table is validated once on construction and immutable afterwards, so
/// every consumer may assume unique names, positive factors and products
/// that fit in a `u64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHierarchy", into = "RawHierarchy")]
pub struct HierarchyTable {
    units: SmallVec<[Unit; 8]>,
    factors: SmallVec<[u64; 8]>,
}

impl HierarchyTable {
    pub fn new<S, U, F>(units: U, factors: F) -> Result<Self>
    where
        S: Into<String>,
        U: IntoIterator<Item = S>,
        F: IntoIterator<Item = u64>,
    {
        let units: SmallVec<[Unit; 8]> = units.into_iter().map(|u| Unit(u.into())).collect();
        let mut factors: SmallVec<[u64; 8]> = factors.into_iter().collect();

        if units.len() < 2 {
            return Err(GranularityError::invalid_hierarchy(format!(
                "at least two units are required, got {}",
                units.len()
            )));
        }
        if units.len() != factors.len() {
            return Err(GranularityError::invalid_hierarchy(format!(
                "{} units but {} conversion factors",
                units.len(),
                factors.len()
            )));
        }

        let mut seen = HashSet::with_capacity(units.len());
        for unit in &units {
            if unit.0.trim().is_empty() {
                return Err(GranularityError::invalid_hierarchy("unit names must not be empty"));
            }
            if !seen.insert(unit.as_str()) {
                return Err(GranularityError::invalid_hierarchy(format!(
                    "unit '{}' appears more than once",
                    unit
                )));
            }
        }

        // Placeholder for the base unit.
        factors[0] = 1;

        let mut total: u64 = 1;
        for (unit, &factor) in units.iter().zip(factors.iter()).skip(1) {
            if factor == 0 {
                return Err(GranularityError::invalid_hierarchy(format!(
                    "conversion factor for '{}' must be positive",
                    unit
                )));
            }
            total = total.checked_mul(factor).ok_or_else(|| {
                GranularityError::invalid_hierarchy(format!(
                    "conversion factors overflow at unit '{}'",
                    unit
                ))
            })?;
        }

        Ok(Self { units, factors })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false: a valid table holds at least two units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit_names(&self) -> Vec<String> {
        self.units.iter().map(|u| u.0.clone()).collect()
    }

    pub fn base(&self) -> &Unit {
        &self.units[0]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.iter().any(|u| u.as_str() == name)
    }

    /// Factor linking `units[pos - 1]` to `units[pos]`.
    #[inline]
    pub(crate) fn factor_at(&self, pos: usize) -> u64 {
        self.factors[pos]
    }

    /// Position of `name` in the finest-to-coarsest ordering.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.units
            .iter()
            .position(|u| u.as_str() == name)
            .ok_or_else(|| GranularityError::InvalidUnit {
                unit: name.to_string(),
                known: self.unit_names(),
            })
    }

    /// The unit immediately above `name`, or `None` for the coarsest unit.
    pub fn next_coarser(&self, name: &str) -> Result<Option<&Unit>> {
        let pos = self.position(name)?;
        Ok(self.units.get(pos + 1))
    }

    /// Number of base units in one `name`. The base unit scales to 1.
    pub fn scale_from_base(&self, name: &str) -> Result<u64> {
        let pos = self.position(name)?;
        Ok(self.factors[1..=pos].iter().product())
    }
}

impl TryFrom<RawHierarchy> for HierarchyTable {
    type Error = GranularityError;

    fn try_from(raw: RawHierarchy) -> Result<Self> {
        Self::new(raw.units, raw.factors)
    }
}

impl From<HierarchyTable> for RawHierarchy {
    fn from(table: HierarchyTable) -> Self {
        Self {
            units: table.unit_names(),
            factors: table.factors.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cricket() -> HierarchyTable {
        HierarchyTable::new(["ball", "over", "inning", "match"], [1, 6, 20, 2]).unwrap()
    }

    #[rstest]
    #[case(vec!["ball"], vec![1])]
    #[case(vec!["ball", "over"], vec![1])]
    #[case(vec!["ball", "over"], vec![1, 0])]
    #[case(vec!["ball", "ball"], vec![1, 6])]
    #[case(vec!["ball", " "], vec![1, 6])]
    #[case(vec!["a", "b", "c"], vec![1, u64::MAX, 2])]
    fn test_invalid_tables_are_rejected(#[case] units: Vec<&str>, #[case] factors: Vec<u64>) {
        let err = HierarchyTable::new(units, factors).unwrap_err();
        assert!(matches!(err, GranularityError::InvalidHierarchy { .. }));
    }

    #[test]
    fn test_placeholder_factor_is_ignored() {
        let a = HierarchyTable::new(["ball", "over"], [42, 6]).unwrap();
        let b = HierarchyTable::new(["ball", "over"], [1, 6]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.scale_from_base("over").unwrap(), 6);
    }

    #[rstest]
    #[case("ball", 1)]
    #[case("over", 6)]
    #[case("inning", 120)]
    #[case("match", 240)]
    fn test_scale_from_base(#[case] unit: &str, #[case] expected: u64) {
        assert_eq!(cricket().scale_from_base(unit).unwrap(), expected);
    }

    #[test]
    fn test_next_coarser() {
        let table = cricket();
        assert_eq!(table.next_coarser("over").unwrap().map(Unit::as_str), Some("inning"));
        assert_eq!(table.next_coarser("match").unwrap(), None);
        assert!(matches!(
            table.next_coarser("wicket"),
            Err(GranularityError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip_goes_through_validation() {
        let table = cricket();
        let json = table.to_json().unwrap();
        assert_eq!(HierarchyTable::from_json(&json).unwrap(), table);

        let bad = r#"{ "units": ["ball", "over"], "factors": [1, 0] }"#;
        assert!(matches!(
            HierarchyTable::from_json(bad),
            Err(GranularityError::Config(_))
        ));
    }
}
