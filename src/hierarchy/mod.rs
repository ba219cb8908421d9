//! The hierarchy table and the rules for navigating it.
//!
//! A hierarchy is an ordered ladder of units, finest first. Everything else in
//! the crate reads it through the three sub-modules here: the table itself,
//! order resolution between two units, and conversion factors along the ladder.
pub mod convert;
pub mod order;
pub mod table;

pub use convert::convert;
pub use order::{ascending_order, next_coarser, order, Span, UnitOrder};
pub use table::{HierarchyTable, Unit};
