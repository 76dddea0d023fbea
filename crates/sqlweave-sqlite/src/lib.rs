//! # sqlweave-sqlite
//!
//! SQLite back-end for `sqlweave-repo`.
//!
//! # How SQLite differs from other back-ends
//!
//! - **Transactions**: SQLite has a single isolation level,
//!   serializable. [`IsolationLevel::Serializable`] maps to
//!   `BEGIN IMMEDIATE`, every other level to `BEGIN DEFERRED`.
//! - **[Type affinity]**: values come back by storage class. Only
//!   columns declared `BOOLEAN` are decoded as booleans.
//! - **Constraint errors**: uniqueness failures surface as
//!   `SQLITE_CONSTRAINT_UNIQUE` or `SQLITE_CONSTRAINT_PRIMARYKEY`,
//!   which [`SqliteDuplicateClassifier`] recognizes.
//!
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//! [`IsolationLevel::Serializable`]: sqlweave_repo::IsolationLevel::Serializable
//!
//! ## Example
//!
//! ```ignore
//! use sqlweave_repo::{KeyColumns, RecordMapper, RepositoryOptions};
//!
//! let pool = SqlitePoolOptions::new().connect("sqlite://app.db").await?;
//! let mut repo = sqlweave_sqlite::repository(
//!     pool,
//!     RecordMapper::default(),
//!     KeyColumns::new(&["email"]),
//!     RepositoryOptions::new().with_transactional(true),
//! );
//! repo.save(None, "users", &record).await?;
//! ```

mod classifier;
mod executor;

pub use classifier::SqliteDuplicateClassifier;
pub use executor::SqliteExecutor;

use sqlweave_core::Flavor;
use sqlweave_repo::{FilterFactory, Repository, RepositoryOptions, RowMapper};
use sqlx::SqlitePool;

/// A repository wired for SQLite: sqlx executor, duplicate classifier and
/// the SQLite flavor.
pub fn repository<T, M, F>(
    pool: SqlitePool,
    mapper: M,
    keys: F,
    options: RepositoryOptions,
) -> Repository<T, SqliteExecutor, M, F>
where
    M: RowMapper<T>,
    F: FilterFactory<T>,
{
    Repository::new(SqliteExecutor::new(pool), mapper, keys)
        .with_options(options.with_flavor(Flavor::Sqlite))
        .with_classifier(SqliteDuplicateClassifier)
}
