//! Upsert emulation and transaction orchestration.
//!
//! A [`Repository`] renders statements with the configured flavor, runs them
//! through an [`Executor`] and turns back-end duplicate signals into
//! [`RepoError::DuplicatedEntry`].
//!
//! In transactional mode every mutating operation runs between `begin` and
//! `commit`. Any error rolls the transaction back and is returned as is; a
//! failing rollback is only logged.

use std::marker::PhantomData;

use sqlweave_core::{Delete, Expr, Insert, Record, Select, Sorting, SqlValue, Update};
use tracing::{debug, info, warn};

use crate::classifier::{chain_is_duplicate, DuplicateKeyClassifier, NeverDuplicate};
use crate::context::Context;
use crate::error::{BoxError, RepoError, Result};
use crate::executor::Executor;
use crate::mapper::{FilterFactory, RowMapper};
use crate::options::{ExistingRowPolicy, RepositoryOptions};

/// Filter, order and page of a `fetch_many`.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filter: Option<Expr>,
    sort: Sorting,
    offset: u64,
    count: u64,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sorting) -> Self {
        self.sort = sort;
        self
    }

    /// Page size. `0` fetches every matching row.
    #[must_use]
    pub const fn with_limit(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

/// Data access for values of `T` stored in one or more tables.
///
/// - `E` runs the statements.
/// - `M` converts values to and from records.
/// - `F` derives the natural-key filter of a value.
pub struct Repository<T, E, M, F> {
    executor: E,
    mapper: M,
    keys: F,
    classifier: Box<dyn DuplicateKeyClassifier + Send + Sync>,
    options: RepositoryOptions,
    _marker: PhantomData<fn() -> T>,
}

impl<T, E, M, F> Repository<T, E, M, F>
where
    E: Executor,
    M: RowMapper<T>,
    F: FilterFactory<T>,
{
    /// Creates a repository with default options and no duplicate
    /// detection.
    #[must_use]
    pub fn new(executor: E, mapper: M, keys: F) -> Self {
        Self {
            executor,
            mapper,
            keys,
            classifier: Box::new(NeverDuplicate),
            options: RepositoryOptions::default(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RepositoryOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the classifier recognizing back-end uniqueness violations.
    #[must_use]
    pub fn with_classifier<C>(mut self, classifier: C) -> Self
    where
        C: DuplicateKeyClassifier + Send + Sync + 'static,
    {
        self.classifier = Box::new(classifier);
        self
    }

    #[must_use]
    pub const fn options(&self) -> &RepositoryOptions {
        &self.options
    }

    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    #[must_use]
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Inserts `value` unless a row with its natural key exists.
    ///
    /// The pre-check is advisory; a uniqueness violation reported by the
    /// back-end is authoritative. When the pre-check finds a row, no INSERT
    /// is attempted and the outcome follows
    /// [`RepositoryOptions::existing_row`].
    ///
    /// # Errors
    ///
    /// [`RepoError::DuplicatedEntry`] on an existing key, or any error of
    /// the back-end, the mapper or the builders.
    pub async fn create(&mut self, ctx: Option<&Context>, table: &str, value: &T) -> Result<u64> {
        let ctx = ctx.copied().unwrap_or_default();
        self.begin(&ctx, table).await?;
        let outcome = self.create_steps(&ctx, table, value).await;
        self.finish(&ctx, table, outcome).await
    }

    /// Updates the row with the natural key of `value`, inserting it when
    /// nothing was updated.
    ///
    /// # Errors
    ///
    /// [`RepoError::DuplicatedEntry`] when either statement violates a
    /// uniqueness constraint, or any other failure.
    pub async fn save(&mut self, ctx: Option<&Context>, table: &str, value: &T) -> Result<u64> {
        let ctx = ctx.copied().unwrap_or_default();
        self.begin(&ctx, table).await?;
        let outcome = self.save_steps(&ctx, table, value).await;
        self.finish(&ctx, table, outcome).await
    }

    /// Updates the row with the natural key of `value`. Zero rows is not an
    /// error.
    ///
    /// # Errors
    ///
    /// See [`Repository::save`].
    pub async fn update(&mut self, ctx: Option<&Context>, table: &str, value: &T) -> Result<u64> {
        let ctx = ctx.copied().unwrap_or_default();
        self.begin(&ctx, table).await?;
        let outcome = self.update_steps(&ctx, table, value).await;
        self.finish(&ctx, table, outcome).await
    }

    /// Deletes the row with the natural key of `value`.
    ///
    /// # Errors
    ///
    /// Back-end failures or an empty natural key.
    pub async fn delete(&mut self, ctx: Option<&Context>, table: &str, value: &T) -> Result<u64> {
        let ctx = ctx.copied().unwrap_or_default();
        self.begin(&ctx, table).await?;
        let outcome = self.delete_steps(&ctx, table, value).await;
        self.finish(&ctx, table, outcome).await
    }

    /// Deletes every row matching `filter`, one primary key at a time.
    ///
    /// # Errors
    ///
    /// The first failure stops the loop and is returned as
    /// [`RepoError::Partial`] carrying the rows deleted so far. In
    /// transactional mode those deletions have been rolled back.
    pub async fn delete_many(
        &mut self,
        ctx: Option<&Context>,
        table: &str,
        filter: &Expr,
    ) -> Result<u64> {
        let ctx = ctx.copied().unwrap_or_default();
        self.begin(&ctx, table).await?;
        let outcome = self.delete_many_steps(&ctx, table, filter).await;
        self.finish(&ctx, table, outcome).await
    }

    /// Fetches the first row matching `filter`.
    ///
    /// # Errors
    ///
    /// Back-end or mapping failures.
    pub async fn fetch_one(
        &mut self,
        ctx: Option<&Context>,
        table: &str,
        filter: &Expr,
    ) -> Result<Option<T>> {
        let ctx = ctx.copied().unwrap_or_default();
        let select = self.select(table).with_filter(filter.clone()).with_limit(1);
        let rows = self.query(&ctx, &select).await?;
        rows.into_iter()
            .next()
            .map(|row| self.mapper.from_record(row))
            .transpose()
    }

    /// Fetches every row selected by `query`.
    ///
    /// # Errors
    ///
    /// Back-end or mapping failures.
    pub async fn fetch_many(
        &mut self,
        ctx: Option<&Context>,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>> {
        let ctx = ctx.copied().unwrap_or_default();
        let mut select = self
            .select(table)
            .with_sort(query.sort.clone())
            .with_limit(query.count)
            .with_offset(query.offset);
        if let Some(ref filter) = query.filter {
            select = select.with_filter(filter.clone());
        }
        let rows = self.query(&ctx, &select).await?;
        rows.into_iter()
            .map(|row| self.mapper.from_record(row))
            .collect()
    }

    /// Counts rows matching `filter`.
    ///
    /// # Errors
    ///
    /// Back-end failures, or [`RepoError::Mapping`] when the back-end
    /// returns no integer count.
    pub async fn count(&mut self, ctx: Option<&Context>, table: &str, filter: &Expr) -> Result<u64> {
        let ctx = ctx.copied().unwrap_or_default();
        let select = Select::new(table)
            .with_flavor(self.options.flavor)
            .with_columns(&["COUNT(*) AS count"])
            .with_filter(filter.clone());
        let rows = self.query(&ctx, &select).await?;
        rows.into_iter()
            .next()
            .and_then(|row| row.get("count").and_then(SqlValue::as_int))
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| RepoError::Mapping(format!("count of '{table}' returned no integer")))
    }

    async fn create_steps(&mut self, ctx: &Context, table: &str, value: &T) -> Result<u64> {
        let filter = self.natural_key(table, value)?;
        let probe = self.select(table).with_filter(filter).with_limit(1);
        if !self.query(ctx, &probe).await?.is_empty() {
            return match self.options.existing_row {
                ExistingRowPolicy::Reject => {
                    info!(table = %table, "Row with the same key exists, rejecting create");
                    Err(RepoError::DuplicatedEntry)
                }
                ExistingRowPolicy::Skip => {
                    info!(table = %table, "Row with the same key exists, skipping create");
                    Ok(0)
                }
            };
        }

        let record = self.mapper.to_record(value)?;
        self.insert(ctx, table, record).await
    }

    async fn save_steps(&mut self, ctx: &Context, table: &str, value: &T) -> Result<u64> {
        let filter = self.natural_key(table, value)?;
        let record = self.mapper.to_record(value)?;
        let update = Update::new(table)
            .with_flavor(self.options.flavor)
            .with_values(record.clone())
            .with_filter(filter);
        let (sql, params) = update.build(&self.options.render_options())?;
        let updated = self.execute(ctx, &sql, &params).await?;
        if updated > 0 {
            return Ok(updated);
        }

        info!(table = %table, "No row updated, falling back to insert");
        self.insert(ctx, table, record).await
    }

    async fn update_steps(&mut self, ctx: &Context, table: &str, value: &T) -> Result<u64> {
        let filter = self.natural_key(table, value)?;
        let record = self.mapper.to_record(value)?;
        let (sql, params) = Update::new(table)
            .with_flavor(self.options.flavor)
            .with_values(record)
            .with_filter(filter)
            .build(&self.options.render_options())?;
        self.execute(ctx, &sql, &params).await
    }

    async fn delete_steps(&mut self, ctx: &Context, table: &str, value: &T) -> Result<u64> {
        let filter = self.natural_key(table, value)?;
        let (sql, params) = Delete::new(table)
            .with_flavor(self.options.flavor)
            .with_filter(filter)
            .build(&self.options.render_options());
        self.execute(ctx, &sql, &params).await
    }

    async fn delete_many_steps(&mut self, ctx: &Context, table: &str, filter: &Expr) -> Result<u64> {
        let pk = self.mapper.primary_key(table);
        let select = Select::new(table)
            .with_flavor(self.options.flavor)
            .with_columns(&[pk.as_str()])
            .with_filter(filter.clone());
        let rows = self.query(ctx, &select).await?;
        debug!(table = %table, rows = rows.len(), "Deleting matched rows");

        let mut affected = 0;
        for mut row in rows {
            let outcome = match row.remove(&pk) {
                Some(key) => self.delete_by_key(ctx, table, &pk, key).await,
                None => Err(RepoError::MissingPrimaryKey {
                    table: String::from(table),
                    column: pk.clone(),
                }),
            };
            match outcome {
                Ok(n) => affected += n,
                Err(err) => {
                    return Err(RepoError::Partial {
                        affected,
                        source: Box::new(err),
                    })
                }
            }
        }
        Ok(affected)
    }

    async fn delete_by_key(
        &mut self,
        ctx: &Context,
        table: &str,
        pk: &str,
        key: SqlValue,
    ) -> Result<u64> {
        let (sql, params) = Delete::new(table)
            .with_flavor(self.options.flavor)
            .with_filter(Expr::eq(pk, key))
            .build(&self.options.render_options());
        self.execute(ctx, &sql, &params).await
    }

    async fn insert(&mut self, ctx: &Context, table: &str, record: Record) -> Result<u64> {
        let (sql, params) = Insert::new(table)
            .with_flavor(self.options.flavor)
            .with_values(record)
            .build(&self.options.render_options())?;
        self.execute(ctx, &sql, &params).await
    }

    fn natural_key(&self, table: &str, value: &T) -> Result<Expr> {
        let filter = self.keys.natural_key(value);
        if filter.is_empty() {
            return Err(RepoError::Mapping(format!(
                "natural key for '{table}' is empty"
            )));
        }
        Ok(filter)
    }

    fn select(&self, table: &str) -> Select {
        Select::new(table)
            .with_flavor(self.options.flavor)
            .with_columns(&self.mapper.columns(table))
    }

    async fn execute(&mut self, ctx: &Context, sql: &str, params: &[SqlValue]) -> Result<u64> {
        debug!(sql = %sql, params = params.len(), "Executing statement");
        let outcome = ctx.run(self.executor.execute(ctx, sql, params)).await?;
        outcome.map_err(|e| self.classify(e))
    }

    async fn query(&mut self, ctx: &Context, select: &Select) -> Result<Vec<Record>> {
        let (sql, params) = select.build(&self.options.render_options());
        debug!(sql = %sql, params = params.len(), "Running query");
        let outcome = ctx.run(self.executor.query(ctx, &sql, &params)).await?;
        outcome.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: BoxError) -> RepoError {
        if chain_is_duplicate(&*self.classifier, &*err) {
            warn!(error = %err, "Back-end reported a duplicate key");
            RepoError::DuplicatedEntry
        } else {
            RepoError::Backend(err)
        }
    }

    async fn begin(&mut self, ctx: &Context, table: &str) -> Result<()> {
        if !self.options.transactional {
            return Ok(());
        }
        let isolation = self.options.isolation;
        debug!(table = %table, ?isolation, "Beginning transaction");
        ctx.run(self.executor.begin(isolation))
            .await?
            .map_err(RepoError::Backend)
    }

    /// Commits a successful outcome, rolls back a failed one.
    async fn finish(&mut self, ctx: &Context, table: &str, outcome: Result<u64>) -> Result<u64> {
        if !self.options.transactional {
            return outcome;
        }

        let err = match outcome {
            // Once COMMIT is sent it runs to completion, deadline or not.
            Ok(_) if ctx.is_expired() => RepoError::DeadlineExceeded,
            Ok(affected) => match self.executor.commit().await {
                Ok(()) => {
                    debug!(table = %table, affected, "Transaction committed");
                    return Ok(affected);
                }
                Err(e) => self.classify(e),
            },
            Err(err) => err,
        };

        // Rollback ignores the deadline: it must run even after it passed.
        if let Err(rollback) = self.executor.rollback().await {
            warn!(table = %table, error = %rollback, "Rollback failed");
        } else {
            debug!(table = %table, "Transaction rolled back");
        }
        Err(err)
    }
}
