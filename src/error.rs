//! Defines the error types shared by every granularity operation.
use std::result;
use thiserror::Error;

pub type Result<T, E = GranularityError> = result::Result<T, E>;

/// How a unit pair breaks the finest-to-coarsest ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderViolation {
    /// Both halves name the same unit.
    Identical,
    /// The coarse unit was supplied first.
    Reversed,
}

/// The broad category of a `GranularityError`, so callers can branch on the
/// failure class without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dataset, index, or hierarchy is missing or unusable.
    Structural,
    /// A unit or compound name is unknown, malformed, or badly ordered.
    Naming,
    /// The granularity cannot be obtained from the supplied hierarchy.
    Derivability,
}

#[derive(Error, Debug)]
pub enum GranularityError {
    #[error("Not a time series: {reason}")]
    NotATimeSeries { reason: String },
    #[error("A granularity name must be supplied")]
    MissingGranularityName,
    #[error("A hierarchy table is required for non-calendar indices")]
    MissingHierarchy,
    #[error("Unknown unit '{unit}', expected one of {known:?}")]
    InvalidUnit { unit: String, known: Vec<String> },
    #[error("Malformed granularity name '{name}', expected '<fine>_<coarse>'")]
    MalformedName { name: String },
    #[error("Invalid unit order '{lower}' -> '{upper}': {violation:?}")]
    InvalidOrder {
        lower: String,
        upper: String,
        violation: OrderViolation,
    },
    #[error("Unit '{unit}' is the coarsest in the hierarchy and has nothing above it")]
    NoCoarserUnit { unit: String },
    #[error("Granularity '{name}' cannot be derived from the hierarchy table")]
    UnderivableGranularity { name: String },
    #[error("Column '{column}' not found in dataset")]
    MissingColumn { column: String },
    #[error("Invalid hierarchy table: {reason}")]
    InvalidHierarchy { reason: String },
    #[error("Index value at row {row} is not finite")]
    NonFiniteIndex { row: usize },
    #[error("Index value at row {row} is too large to count in whole units")]
    IndexOutOfRange { row: usize },
    #[error("Granularity of size {size} has only {labels} labels")]
    UnlabelledPosition { size: u64, labels: usize },
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Column '{column}' already exists")]
    DuplicateColumn { column: String },
    #[error("Unit '{unit}' is finer than the index resolution '{resolution}'")]
    UnitFinerThanIndex { unit: String, resolution: String },
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

impl GranularityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotATimeSeries { .. }
            | Self::MissingHierarchy
            | Self::MissingColumn { .. }
            | Self::InvalidHierarchy { .. }
            | Self::NonFiniteIndex { .. }
            | Self::IndexOutOfRange { .. }
            | Self::UnlabelledPosition { .. }
            | Self::LengthMismatch { .. }
            | Self::DuplicateColumn { .. }
            | Self::Config(_) => ErrorKind::Structural,
            Self::MissingGranularityName
            | Self::InvalidUnit { .. }
            | Self::MalformedName { .. }
            | Self::InvalidOrder { .. }
            | Self::NoCoarserUnit { .. }
            | Self::UnitFinerThanIndex { .. } => ErrorKind::Naming,
            Self::UnderivableGranularity { .. } => ErrorKind::Derivability,
        }
    }

    pub(crate) fn invalid_hierarchy(reason: impl Into<String>) -> Self {
        Self::InvalidHierarchy {
            reason: reason.into(),
        }
    }
}
