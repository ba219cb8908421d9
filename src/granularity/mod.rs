//! Construction of granularities over a user-declared hierarchy.
//!
//! The single-level builder (linearize, then circularize) is the only place
//! that touches raw index values; the recursive builder composes its results
//! for unit pairs that are several levels apart.
pub mod column;
pub mod name;
pub mod recursive;
pub mod search;
pub mod single;

pub use column::GranularityColumn;
pub use name::GranularitySpec;
pub use recursive::build;
pub use search::{derivable_pairs, is_derivable};
pub use single::{build_single, IndexValue};
