//! sqlx-backed executor.

use sqlx::pool::PoolConnection;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, Sqlite, SqlitePool, TypeInfo, ValueRef};
use sqlweave_core::{Record, SqlValue};
use sqlweave_repo::{BoxError, Context, Executor, IsolationLevel};
use tracing::{debug, warn};

/// Runs statements on a SQLite pool.
///
/// Outside a transaction every statement may use a different pooled
/// connection. `begin` pins one connection until `commit` or `rollback`.
#[derive(Debug)]
pub struct SqliteExecutor {
    pool: SqlitePool,
    conn: Option<PoolConnection<Sqlite>>,
}

impl SqliteExecutor {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool, conn: None }
    }

    /// Returns true while a transaction is open.
    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.conn.is_some()
    }

    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Executor for SqliteExecutor {
    async fn execute(
        &mut self,
        _ctx: &Context,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<u64, BoxError> {
        let query = bind_params(sqlx::query(sql), params);
        let done = match self.conn.as_mut() {
            Some(conn) => query.execute(&mut **conn).await?,
            None => query.execute(&self.pool).await?,
        };
        Ok(done.rows_affected())
    }

    async fn query(
        &mut self,
        _ctx: &Context,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<Record>, BoxError> {
        let query = bind_params(sqlx::query(sql), params);
        let rows = match self.conn.as_mut() {
            Some(conn) => query.fetch_all(&mut **conn).await?,
            None => query.fetch_all(&self.pool).await?,
        };
        Ok(rows.iter().map(decode_row).collect::<Result<_, _>>()?)
    }

    async fn begin(&mut self, isolation: IsolationLevel) -> Result<(), BoxError> {
        if self.conn.is_some() {
            return Err("transaction already open".into());
        }
        let mut conn = self.pool.acquire().await?;
        sqlx::query(begin_statement(isolation))
            .execute(&mut *conn)
            .await?;
        self.conn = Some(conn);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BoxError> {
        let Some(mut conn) = self.conn.take() else {
            return Err("no open transaction to commit".into());
        };
        if let Err(err) = sqlx::query("COMMIT").execute(&mut *conn).await {
            // Keep the connection so the caller can still roll back.
            self.conn = Some(conn);
            return Err(err.into());
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), BoxError> {
        let Some(mut conn) = self.conn.take() else {
            return Err("no open transaction to roll back".into());
        };
        if let Err(err) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
            warn!(error = %err, "Closing connection left in an unknown state");
            drop(conn.detach());
            return Err(err.into());
        }
        debug!("Transaction connection released");
        Ok(())
    }
}

/// SQLite transactions are always serializable. The level only decides
/// whether the write lock is taken up front.
const fn begin_statement(isolation: IsolationLevel) -> &'static str {
    match isolation {
        IsolationLevel::Serializable => "BEGIN IMMEDIATE",
        IsolationLevel::ReadUncommitted
        | IsolationLevel::ReadCommitted
        | IsolationLevel::RepeatableRead => "BEGIN DEFERRED",
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in params {
        query = match value.clone() {
            SqlValue::Null => query.bind(Option::<i64>::None),
            SqlValue::Bool(b) => query.bind(b),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Text(s) => query.bind(s),
            SqlValue::Blob(b) => query.bind(b),
        };
    }
    query
}

/// Decodes by storage class. Columns declared `BOOLEAN` decode as booleans.
fn decode_row(row: &SqliteRow) -> Result<Record, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| {
            let index = column.ordinal();
            let raw = row.try_get_raw(index)?;
            let value = if raw.is_null() {
                SqlValue::Null
            } else if column.type_info().name() == "BOOLEAN" {
                SqlValue::Bool(row.try_get(index)?)
            } else {
                match raw.type_info().name() {
                    "INTEGER" => SqlValue::Int(row.try_get(index)?),
                    "REAL" => SqlValue::Float(row.try_get(index)?),
                    "BLOB" => SqlValue::Blob(row.try_get(index)?),
                    _ => SqlValue::Text(row.try_get(index)?),
                }
            };
            Ok((String::from(column.name()), value))
        })
        .collect()
}
