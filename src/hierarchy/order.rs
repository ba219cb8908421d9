//! Resolves the relative placement of two units within a hierarchy.
use super::table::{HierarchyTable, Unit};
use crate::error::{GranularityError, OrderViolation, Result};

/// Relationship between a fine and a coarse unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOrder<'a> {
    /// Both names resolve to the same position.
    Identical,
    /// The "fine" unit is actually coarser than the "coarse" unit.
    Reversed,
    /// A usable fine-to-coarse pair.
    Ascending(Span<'a>),
}

/// Distance between a correctly ordered pair of units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    /// The coarse unit sits directly above the fine unit.
    Adjacent,
    /// The units are `gap` levels apart; `next` is the unit directly above the fine one.
    MultiLevel { gap: usize, next: &'a Unit },
}

/// Classifies `(lgran, ugran)` against the table.
///
/// Fails with `InvalidUnit` if either name is absent.
pub fn order<'a>(lgran: &str, ugran: &str, table: &'a HierarchyTable) -> Result<UnitOrder<'a>> {
    let lower = table.position(lgran)?;
    let upper = table.position(ugran)?;

    Ok(if lower > upper {
        UnitOrder::Reversed
    } else if lower == upper {
        UnitOrder::Identical
    } else if upper - lower == 1 {
        UnitOrder::Ascending(Span::Adjacent)
    } else {
        UnitOrder::Ascending(Span::MultiLevel {
            gap: upper - lower,
            next: &table.units()[lower + 1],
        })
    })
}

/// Like [`order`], but turns `Identical` and `Reversed` into `InvalidOrder` errors.
pub fn ascending_order<'a>(lgran: &str, ugran: &str, table: &'a HierarchyTable) -> Result<Span<'a>> {
    let violation = match order(lgran, ugran, table)? {
        UnitOrder::Ascending(span) => return Ok(span),
        UnitOrder::Identical => OrderViolation::Identical,
        UnitOrder::Reversed => OrderViolation::Reversed,
    };
    Err(GranularityError::InvalidOrder {
        lower: lgran.to_string(),
        upper: ugran.to_string(),
        violation,
    })
}

/// Single-step accessor; `None` for the coarsest unit.
pub fn next_coarser<'a>(unit: &str, table: &'a HierarchyTable) -> Result<Option<&'a Unit>> {
    table.next_coarser(unit)
}
