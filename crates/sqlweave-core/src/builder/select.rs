//! SELECT statement builder.

use super::expr::{Expr, RenderOptions};
use super::sort::Sorting;
use super::value::SqlValue;
use crate::dialect::Flavor;
use crate::placeholder::PlaceholderStrategy;

/// A SELECT statement builder.
///
/// Configure with the `with_*` methods, then call [`Select::build`]. Every
/// build draws markers from a fresh generator, so building twice yields the
/// same output. A builder is plain data and is not meant to be mutated from
/// several threads.
///
/// **Note**: [`Select::with_flavor`] resets the placeholder strategy to the
/// flavor default. Call [`Select::with_placeholder`] after it, never before,
/// or the custom strategy is silently replaced.
#[derive(Debug, Clone)]
pub struct Select {
    columns: Vec<String>,
    tables: Vec<String>,
    filter: Option<Expr>,
    group_by: Vec<String>,
    having: Option<Expr>,
    sort: Sorting,
    offset: u64,
    count: u64,
    flavor: Flavor,
    placeholder: PlaceholderStrategy,
}

impl Select {
    /// Creates a `SELECT * FROM table` builder for the generic flavor.
    #[must_use]
    pub fn new(table: &str) -> Self {
        let flavor = Flavor::default();
        Self {
            columns: vec![],
            tables: vec![String::from(table)],
            filter: None,
            group_by: vec![],
            having: None,
            sort: Sorting::new(),
            offset: 0,
            count: 0,
            flavor,
            placeholder: flavor.placeholder(),
        }
    }

    /// Specifies the columns to select. An empty list selects `*`.
    #[must_use]
    pub fn with_columns<S: AsRef<str>>(mut self, cols: &[S]) -> Self {
        self.columns = cols.iter().map(|s| String::from(s.as_ref())).collect();
        self
    }

    /// Replaces the FROM list.
    #[must_use]
    pub fn with_tables<S: AsRef<str>>(mut self, tables: &[S]) -> Self {
        self.tables = tables.iter().map(|s| String::from(s.as_ref())).collect();
        self
    }

    /// Sets the WHERE filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the GROUP BY columns.
    #[must_use]
    pub fn with_group_by<S: AsRef<str>>(mut self, cols: &[S]) -> Self {
        self.group_by = cols.iter().map(|s| String::from(s.as_ref())).collect();
        self
    }

    /// Sets the HAVING filter.
    #[must_use]
    pub fn with_having(mut self, filter: Expr) -> Self {
        self.having = Some(filter);
        self
    }

    /// Sets the ORDER BY specification.
    #[must_use]
    pub fn with_sort(mut self, sort: Sorting) -> Self {
        self.sort = sort;
        self
    }

    /// Limits the result to `count` rows. `0` means unbounded.
    #[must_use]
    pub const fn with_limit(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Skips the first `offset` rows. Ignored while the limit is 0.
    #[must_use]
    pub const fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Clears limit and offset.
    #[must_use]
    pub const fn reset_pagination(mut self) -> Self {
        self.offset = 0;
        self.count = 0;
        self
    }

    /// Targets `flavor` and resets the placeholder strategy to its default.
    #[must_use]
    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self.placeholder = flavor.placeholder();
        self
    }

    /// Overrides the placeholder strategy until the next `with_flavor`.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: PlaceholderStrategy) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Returns the target flavor.
    #[must_use]
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Builds the statement and its values in marker order.
    ///
    /// Document-store flavors qualify every bare reference with `c` unless
    /// `opts` carries another alias. The default alias only applies to a
    /// single-table FROM. An alias from `opts` is attached to the first
    /// table.
    #[must_use]
    pub fn build(&self, opts: &RenderOptions) -> (String, Vec<SqlValue>) {
        let dialect = self.flavor.dialect();
        let default_alias = match self.tables.as_slice() {
            [_] => dialect.default_table_alias().map(String::from),
            _ => None,
        };
        let render = RenderOptions {
            table_alias: opts.table_alias.clone().or(default_alias),
        };
        let mut gen = self.placeholder.generator();
        let mut params = vec![];

        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            let cols: Vec<String> = self.columns.iter().map(|c| render.qualify(c)).collect();
            sql.push_str(&cols.join(","));
        }

        sql.push_str(" FROM ");
        for (i, table) in self.tables.iter().enumerate() {
            if i > 0 {
                sql.push(',');
            }
            sql.push_str(table);
            if let (0, Some(alias)) = (i, &render.table_alias) {
                sql.push(' ');
                sql.push_str(alias);
            }
        }

        if let Some(ref filter) = self.filter {
            let (clause, values) = filter.build(Some(gen.as_mut()), &render);
            if !clause.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clause);
                params.extend(values);
            }
        }

        if !self.group_by.is_empty() {
            let cols: Vec<String> = self.group_by.iter().map(|c| render.qualify(c)).collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&cols.join(","));
        }

        if let Some(ref having) = self.having {
            let (clause, values) = having.build(Some(gen.as_mut()), &render);
            if !clause.is_empty() {
                sql.push_str(" HAVING ");
                sql.push_str(&clause);
                params.extend(values);
            }
        }

        let ordered = !self.sort.is_empty();
        if ordered {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.sort.build(&render));
        }

        if self.count != 0 {
            if let Some(clause) = dialect.pagination(self.offset, self.count, ordered) {
                sql.push(' ');
                sql.push_str(&clause);
            }
        }

        (sql, params)
    }
}
