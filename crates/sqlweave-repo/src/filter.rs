//! Filters from dynamic input.

use serde_json::{Map, Number, Value};
use sqlweave_core::{BuildError, Expr, SqlValue};

/// Builds an AND of equalities from a JSON object.
///
/// Every entry must hold a scalar. `null` entries become `IS NULL` checks
/// since `= NULL` never matches.
///
/// ```rust
/// use serde_json::json;
/// use sqlweave_core::RenderOptions;
/// use sqlweave_repo::filter_from_json;
///
/// let filter = filter_from_json(&json!({ "status": "open", "owner": null })).unwrap();
/// let mut gen = sqlweave_core::Flavor::Postgres.placeholder().generator();
/// let (sql, params) = filter.build(Some(gen.as_mut()), &RenderOptions::default());
/// assert_eq!(sql, "(owner IS NULL) AND (status = $1)");
/// assert_eq!(params.len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`BuildError::UnsupportedInput`] for anything but an object of
/// scalars.
pub fn filter_from_json(input: &Value) -> Result<Expr, BuildError> {
    let Value::Object(entries) = input else {
        return Err(BuildError::UnsupportedInput(format!(
            "expected a JSON object, got {}",
            kind(input)
        )));
    };

    entries
        .iter()
        .map(|(field, value)| match value {
            Value::Null => Ok(Expr::is_null(field)),
            other => json_to_value(other).map(|v| Expr::eq(field, v)).ok_or_else(|| {
                BuildError::UnsupportedInput(format!(
                    "field '{field}' holds a {}, not a scalar",
                    kind(other)
                ))
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Expr::and)
}

/// Converts a JSON scalar. Arrays and objects yield `None`.
pub(crate) fn json_to_value(value: &Value) -> Option<SqlValue> {
    match value {
        Value::Null => Some(SqlValue::Null),
        Value::Bool(b) => Some(SqlValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Int)
            .or_else(|| n.as_f64().map(SqlValue::Float)),
        Value::String(s) => Some(SqlValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn value_to_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Bool(b) => Value::Bool(b),
        SqlValue::Int(n) => Value::Number(n.into()),
        SqlValue::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Blob(bytes) => Value::Array(bytes.into_iter().map(Value::from).collect()),
    }
}

pub(crate) fn record_to_json(record: sqlweave_core::Record) -> Value {
    Value::Object(
        record
            .into_iter()
            .map(|(k, v)| (k, value_to_json(v)))
            .collect::<Map<_, _>>(),
    )
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
