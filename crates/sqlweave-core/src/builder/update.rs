//! UPDATE statement builder.

use super::expr::{Expr, RenderOptions};
use super::value::{SqlValue, ToSqlValue};
use crate::dialect::Flavor;
use crate::error::{BuildError, Result};
use crate::placeholder::PlaceholderStrategy;

/// An UPDATE builder.
///
/// Values are returned as the SET values in emitted order followed by the
/// filter values. As with [`super::Insert`], SET order follows the value
/// source.
///
/// **Note**: [`Update::with_flavor`] resets the placeholder strategy to the
/// flavor default.
#[derive(Debug, Clone)]
pub struct Update {
    table: String,
    assignments: Vec<(String, SqlValue)>,
    filter: Option<Expr>,
    flavor: Flavor,
    placeholder: PlaceholderStrategy,
}

impl Update {
    /// Creates an UPDATE of `table` for the generic flavor.
    #[must_use]
    pub fn new(table: &str) -> Self {
        let flavor = Flavor::default();
        Self {
            table: String::from(table),
            assignments: vec![],
            filter: None,
            flavor,
            placeholder: flavor.placeholder(),
        }
    }

    /// Adds a SET assignment.
    #[must_use]
    pub fn with_set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.assignments
            .push((String::from(column), value.to_sql_value()));
        self
    }

    /// Adds one assignment per pair of a column/value source.
    #[must_use]
    pub fn with_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        self.assignments.extend(
            values
                .into_iter()
                .map(|(k, v)| (String::from(k.as_ref()), v.to_sql_value())),
        );
        self
    }

    /// Sets the WHERE filter.
    ///
    /// **Important**: an UPDATE without a filter touches every row.
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

    /// Builds the statement. A table alias in `opts` applies to the table and
    /// the filter; SET columns stay unqualified.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyAssignments`] when nothing is set.
    pub fn build(&self, opts: &RenderOptions) -> Result<(String, Vec<SqlValue>)> {
        if self.assignments.is_empty() {
            return Err(BuildError::EmptyAssignments(self.table.clone()));
        }

        let mut gen = self.placeholder.generator();
        let mut params = Vec::with_capacity(self.assignments.len());
        let set_parts: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, value)| {
                params.push(value.clone());
                format!("{column}={}", gen.next_marker(column))
            })
            .collect();

        let mut sql = format!("UPDATE {}", self.table);
        if let Some(ref alias) = opts.table_alias {
            sql.push(' ');
            sql.push_str(alias);
        }
        sql.push_str(" SET ");
        sql.push_str(&set_parts.join(","));

        if let Some(ref filter) = self.filter {
            let (clause, values) = filter.build(Some(gen.as_mut()), opts);
            if !clause.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clause);
                params.extend(values);
            }
        }

        Ok((sql, params))
    }
}
