// Library facade: declares the modules and re-exports the public surface.
//
// A granularity is a categorical column giving each row's position within a
// coarser unit, counted in steps of a finer unit ("over of inning",
// "day of week"). Numeric indices are resolved through a user-declared
// `HierarchyTable`; calendar indices use the built-in calendar units.

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod granularity;
pub mod hierarchy;
pub mod store;
pub mod validation;

pub use api::{create_granularities, create_granularity, create_granularity_with, validate_granularity};
pub use config::GranularityOptions;
pub use error::{ErrorKind, GranularityError, OrderViolation, Result};
pub use granularity::{GranularityColumn, GranularitySpec};
pub use hierarchy::{HierarchyTable, Unit};
pub use store::{Categorical, Column, ColumnData, Dataset};
