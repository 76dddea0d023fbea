//! INSERT statement builder.

use super::expr::RenderOptions;
use super::value::{SqlValue, ToSqlValue};
use crate::dialect::Flavor;
use crate::error::{BuildError, Result};
use crate::placeholder::PlaceholderStrategy;

/// A single-row INSERT builder.
///
/// Columns are emitted in the order the value source yields them. When the
/// source is a map, only rely on the column list and the value list being
/// positionally consistent, not on a particular column order.
///
/// **Note**: [`Insert::with_flavor`] resets the placeholder strategy to the
/// flavor default.
#[derive(Debug, Clone)]
pub struct Insert {
    table: String,
    values: Vec<(String, SqlValue)>,
    flavor: Flavor,
    placeholder: PlaceholderStrategy,
}

impl Insert {
    /// Creates an INSERT into `table` for the generic flavor.
    #[must_use]
    pub fn new(table: &str) -> Self {
        let flavor = Flavor::default();
        Self {
            table: String::from(table),
            values: vec![],
            flavor,
            placeholder: flavor.placeholder(),
        }
    }

    /// Adds one column/value pair.
    #[must_use]
    pub fn with_value<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.values.push((String::from(column), value.to_sql_value()));
        self
    }

    /// Adds every pair of a column/value source, e.g. a [`super::Record`].
    #[must_use]
    pub fn with_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        self.values.extend(
            values
                .into_iter()
                .map(|(k, v)| (String::from(k.as_ref()), v.to_sql_value())),
        );
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

    /// Builds the statement.
    ///
    /// Column lists cannot be qualified, so `_opts` is accepted for symmetry
    /// with the other builders and otherwise unused.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyValues`] when no value was added.
    pub fn build(&self, _opts: &RenderOptions) -> Result<(String, Vec<SqlValue>)> {
        if self.values.is_empty() {
            return Err(BuildError::EmptyValues(self.table.clone()));
        }

        let mut gen = self.placeholder.generator();
        let mut columns = Vec::with_capacity(self.values.len());
        let mut markers = Vec::with_capacity(self.values.len());
        let mut params = Vec::with_capacity(self.values.len());
        for (column, value) in &self.values {
            markers.push(gen.next_marker(column));
            columns.push(column.as_str());
            params.push(value.clone());
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(","),
            markers.join(",")
        );
        Ok((sql, params))
    }
}
