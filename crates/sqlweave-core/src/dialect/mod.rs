//! SQL dialect support.
//!
//! Back-ends disagree on parameter markers, pagination syntax and whether
//! references must be qualified by a table alias. A [`Flavor`] names the
//! target back-end; its [`Dialect`] implementation holds the rules.

mod document;
mod generic;
mod oracle;
mod postgres;
mod sqlite;
mod sqlserver;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use document::DocumentStoreDialect;
pub use generic::GenericDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use crate::placeholder::PlaceholderStrategy;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the default parameter marker strategy.
    fn placeholder(&self) -> PlaceholderStrategy {
        PlaceholderStrategy::question()
    }

    /// Renders the pagination clause.
    ///
    /// Only called with `count != 0`. `ordered` tells whether the statement
    /// carries an ORDER BY clause. Returning `None` omits the clause.
    fn pagination(&self, offset: u64, count: u64, ordered: bool) -> Option<String>;

    /// Alias every bare reference is qualified with, if the dialect requires
    /// one.
    fn default_table_alias(&self) -> Option<&'static str> {
        None
    }
}

/// The target back-end of a statement.
///
/// Serializes as snake case (`"sql_server"`, `"document_store"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Generic `?` dialect (`MySQL` and most drivers).
    #[default]
    Question,
    /// `SQLite`.
    Sqlite,
    /// `PostgreSQL`, `$n` markers.
    Postgres,
    /// SQL Server, `@pn` markers.
    SqlServer,
    /// Oracle, `:n` markers.
    Oracle,
    /// SQL-like query language of a document store (Cosmos DB style).
    DocumentStore,
}

impl Flavor {
    /// Every flavor, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Question,
        Self::Sqlite,
        Self::Postgres,
        Self::SqlServer,
        Self::Oracle,
        Self::DocumentStore,
    ];

    /// Returns the rules of this flavor.
    #[must_use]
    pub const fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Question => &GenericDialect,
            Self::Sqlite => &SqliteDialect,
            Self::Postgres => &PostgresDialect,
            Self::SqlServer => &SqlServerDialect,
            Self::Oracle => &OracleDialect,
            Self::DocumentStore => &DocumentStoreDialect,
        }
    }

    /// Returns the default placeholder strategy of this flavor.
    #[must_use]
    pub fn placeholder(self) -> PlaceholderStrategy {
        self.dialect().placeholder()
    }

    /// Returns the configuration name, the same one serde uses.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
            Self::SqlServer => "sql_server",
            Self::Oracle => "oracle",
            Self::DocumentStore => "document_store",
        }
    }

    /// Looks a flavor up by its configuration name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flavor| flavor.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
