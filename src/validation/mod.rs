//! Consistency checks of labelled columns against recomputed granularities.
pub mod validator;

pub use validator::GranularityValidator;
