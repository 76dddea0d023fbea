//! Error types for repository operations.

use sqlweave_core::BuildError;
use thiserror::Error;

/// A type-erased back-end error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Repository-specific errors.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The back-end reported a uniqueness violation, or the pre-check of a
    /// create found a row with the same natural key.
    #[error("duplicated entry")]
    DuplicatedEntry,

    /// Any other back-end failure, passed through unchanged.
    #[error("backend error: {0}")]
    Backend(BoxError),

    /// Malformed builder input.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// A value could not be converted to or from a record.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// A fetched row lacks its primary key column.
    #[error("row of '{table}' has no primary key column '{column}'")]
    MissingPrimaryKey { table: String, column: String },

    /// The context deadline passed before the back-end answered.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// A multi-row operation stopped after `affected` rows.
    #[error("stopped after {affected} row(s): {source}")]
    Partial {
        affected: u64,
        #[source]
        source: Box<RepoError>,
    },
}

impl RepoError {
    /// Rows affected before the failure, for partial outcomes.
    #[must_use]
    pub const fn affected(&self) -> u64 {
        match self {
            Self::Partial { affected, .. } => *affected,
            _ => 0,
        }
    }

    /// Returns true for the normalized duplicate case, including a partial
    /// outcome caused by one.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        match self {
            Self::DuplicatedEntry => true,
            Self::Partial { source, .. } => source.is_duplicate(),
            _ => false,
        }
    }
}

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, RepoError>;
