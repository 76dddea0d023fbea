//! The back-end seam.

use sqlweave_core::{Record, SqlValue};

use crate::context::Context;
use crate::error::BoxError;
use crate::options::IsolationLevel;

/// Runs rendered statements against a back-end.
///
/// Errors are returned untouched; the repository decides whether one is a
/// duplicate-key violation through its [`crate::DuplicateKeyClassifier`].
/// Deadlines are enforced by the repository, so implementations may ignore
/// `ctx` unless they can forward it.
#[allow(async_fn_in_trait)]
pub trait Executor {
    /// Executes a statement and returns the number of affected rows.
    async fn execute(
        &mut self,
        ctx: &Context,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<u64, BoxError>;

    /// Runs a query and returns its rows as records.
    async fn query(
        &mut self,
        ctx: &Context,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<Record>, BoxError>;

    /// Starts a transaction; subsequent calls run inside it.
    async fn begin(&mut self, isolation: IsolationLevel) -> Result<(), BoxError>;

    /// Commits the open transaction.
    async fn commit(&mut self) -> Result<(), BoxError>;

    /// Rolls the open transaction back.
    async fn rollback(&mut self) -> Result<(), BoxError>;
}
