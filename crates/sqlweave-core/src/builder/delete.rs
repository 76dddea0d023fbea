//! DELETE statement builder.

use super::expr::{Expr, RenderOptions};
use super::value::SqlValue;
use crate::dialect::Flavor;
use crate::placeholder::PlaceholderStrategy;

/// A DELETE builder.
///
/// **Note**: [`Delete::with_flavor`] resets the placeholder strategy to the
/// flavor default.
#[derive(Debug, Clone)]
pub struct Delete {
    table: String,
    filter: Option<Expr>,
    flavor: Flavor,
    placeholder: PlaceholderStrategy,
}

impl Delete {
    /// Creates a DELETE from `table` for the generic flavor.
    #[must_use]
    pub fn new(table: &str) -> Self {
        let flavor = Flavor::default();
        Self {
            table: String::from(table),
            filter: None,
            flavor,
            placeholder: flavor.placeholder(),
        }
    }

    /// Sets the WHERE filter.
    ///
    /// **Important**: DELETE without a filter deletes all rows!
    #[must_use]
    pub fn with_filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter);
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

    /// Returns true if a non-empty filter is set.
    #[must_use]
    pub fn has_filter(&self) -> bool {
        self.filter.as_ref().is_some_and(|f| !f.is_empty())
    }

    /// Builds the statement. WHERE is omitted when the filter is absent or
    /// renders empty.
    #[must_use]
    pub fn build(&self, opts: &RenderOptions) -> (String, Vec<SqlValue>) {
        let mut sql = format!("DELETE FROM {}", self.table);
        if let Some(ref alias) = opts.table_alias {
            sql.push(' ');
            sql.push_str(alias);
        }

        let mut params = vec![];
        if let Some(ref filter) = self.filter {
            let mut gen = self.placeholder.generator();
            let (clause, values) = filter.build(Some(gen.as_mut()), opts);
            if !clause.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clause);
                params = values;
            }
        }

        (sql, params)
    }
}
