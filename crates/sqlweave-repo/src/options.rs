//! Repository configuration.

use serde::{Deserialize, Serialize};
use sqlweave_core::{Flavor, RenderOptions};

/// Transaction isolation requested from the back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    ReadUncommitted,
    #[default]
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

/// What `create` does when its pre-check finds a row with the same natural
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingRowPolicy {
    /// Fail with [`crate::RepoError::DuplicatedEntry`].
    #[default]
    Reject,
    /// Succeed with zero rows affected.
    Skip,
}

/// Options of a [`crate::Repository`].
///
/// Missing fields take their defaults when deserialized:
///
/// ```rust
/// use sqlweave_core::Flavor;
/// use sqlweave_repo::{IsolationLevel, RepositoryOptions};
///
/// let opts = RepositoryOptions::from_json(
///     r#"{ "flavor": "postgres", "transactional": true, "isolation": "serializable" }"#,
/// )
/// .unwrap();
/// assert_eq!(opts.flavor, Flavor::Postgres);
/// assert_eq!(opts.isolation, IsolationLevel::Serializable);
/// assert_eq!(opts.table_alias, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryOptions {
    /// Target dialect of every rendered statement.
    pub flavor: Flavor,
    /// Wraps each mutating operation in a transaction.
    pub transactional: bool,
    /// Isolation level used when `transactional` is set.
    pub isolation: IsolationLevel,
    pub existing_row: ExistingRowPolicy,
    /// Alias qualifying bare field references.
    pub table_alias: Option<String>,
}

impl RepositoryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    #[must_use]
    pub const fn with_transactional(mut self, transactional: bool) -> Self {
        self.transactional = transactional;
        self
    }

    #[must_use]
    pub const fn with_isolation(mut self, isolation: IsolationLevel) -> Self {
        self.isolation = isolation;
        self
    }

    #[must_use]
    pub const fn with_existing_row(mut self, policy: ExistingRowPolicy) -> Self {
        self.existing_row = policy;
        self
    }

    #[must_use]
    pub fn with_table_alias(mut self, alias: impl Into<String>) -> Self {
        self.table_alias = Some(alias.into());
        self
    }

    /// Parses options from JSON.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error for malformed input or unknown
    /// enum names.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions {
            table_alias: self.table_alias.clone(),
        }
    }
}
