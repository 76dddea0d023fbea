//! Build-time errors.

use thiserror::Error;

/// Malformed builder input, reported before anything is executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// INSERT without any column/value pair.
    #[error("insert into '{0}' has no values")]
    EmptyValues(String),

    /// UPDATE without any SET assignment.
    #[error("update of '{0}' has no assignments")]
    EmptyAssignments(String),

    /// Input whose shape cannot be turned into a filter or sort.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Result type alias for builder operations.
pub type Result<T> = std::result::Result<T, BuildError>;
