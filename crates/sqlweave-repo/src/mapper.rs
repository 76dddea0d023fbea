//! Conversions between domain values and records, and natural keys.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlweave_core::{Expr, Record};

use crate::error::{RepoError, Result};
use crate::filter::{json_to_value, record_to_json};

/// Maps values of `T` to and from flat records.
pub trait RowMapper<T> {
    /// Flattens `value` into a column to value mapping.
    fn to_record(&self, value: &T) -> Result<Record>;

    /// Rebuilds a value from a fetched row.
    fn from_record(&self, record: Record) -> Result<T>;

    /// Columns to select from `table`. Empty selects `*`.
    fn columns(&self, _table: &str) -> Vec<String> {
        Vec::new()
    }

    /// Primary key column of `table`.
    fn primary_key(&self, _table: &str) -> String {
        String::from("id")
    }
}

/// Identity mapper for callers working with records directly.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    primary_key: String,
}

impl RecordMapper {
    #[must_use]
    pub fn new(primary_key: &str) -> Self {
        Self {
            primary_key: String::from(primary_key),
        }
    }
}

impl Default for RecordMapper {
    fn default() -> Self {
        Self::new("id")
    }
}

impl RowMapper<Record> for RecordMapper {
    fn to_record(&self, value: &Record) -> Result<Record> {
        Ok(value.clone())
    }

    fn from_record(&self, record: Record) -> Result<Record> {
        Ok(record)
    }

    fn primary_key(&self, _table: &str) -> String {
        self.primary_key.clone()
    }
}

/// Maps any serde struct whose fields are scalars.
///
/// Nested objects and sequences are rejected with [`RepoError::Mapping`].
pub struct SerdeMapper<T> {
    columns: Vec<String>,
    primary_key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeMapper<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            primary_key: String::from("id"),
            _marker: PhantomData,
        }
    }

    /// Restricts fetches to these columns.
    #[must_use]
    pub fn with_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.columns = columns.iter().map(|c| String::from(c.as_ref())).collect();
        self
    }

    #[must_use]
    pub fn with_primary_key(mut self, column: &str) -> Self {
        self.primary_key = String::from(column);
        self
    }
}

impl<T> Default for SerdeMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SerdeMapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerdeMapper")
            .field("columns", &self.columns)
            .field("primary_key", &self.primary_key)
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> RowMapper<T> for SerdeMapper<T> {
    fn to_record(&self, value: &T) -> Result<Record> {
        let json = serde_json::to_value(value).map_err(|e| RepoError::Mapping(e.to_string()))?;
        let Value::Object(fields) = json else {
            return Err(RepoError::Mapping(String::from(
                "value does not serialize to an object",
            )));
        };
        fields
            .into_iter()
            .map(|(column, v)| {
                json_to_value(&v)
                    .map(|v| (column.clone(), v))
                    .ok_or_else(|| RepoError::Mapping(format!("field '{column}' is not a scalar")))
            })
            .collect()
    }

    fn from_record(&self, record: Record) -> Result<T> {
        serde_json::from_value(record_to_json(record)).map_err(|e| RepoError::Mapping(e.to_string()))
    }

    fn columns(&self, _table: &str) -> Vec<String> {
        self.columns.clone()
    }

    fn primary_key(&self, _table: &str) -> String {
        self.primary_key.clone()
    }
}

/// Produces the filter identifying the stored row of a value.
pub trait FilterFactory<T> {
    fn natural_key(&self, value: &T) -> Expr;
}

impl<T, F> FilterFactory<T> for F
where
    F: Fn(&T) -> Expr,
{
    fn natural_key(&self, value: &T) -> Expr {
        self(value)
    }
}

/// Natural key made of named record columns, AND-ed as equalities.
///
/// Columns missing from the record are left out.
#[derive(Debug, Clone)]
pub struct KeyColumns(Vec<String>);

impl KeyColumns {
    #[must_use]
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self(columns.iter().map(|c| String::from(c.as_ref())).collect())
    }
}

impl FilterFactory<Record> for KeyColumns {
    fn natural_key(&self, value: &Record) -> Expr {
        Expr::from_pairs(
            self.0
                .iter()
                .filter_map(|column| value.get(column).map(|v| (column.as_str(), v))),
        )
    }
}
