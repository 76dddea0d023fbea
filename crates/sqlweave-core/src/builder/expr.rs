//! Dialect-agnostic filter expressions.
//!
//! An [`Expr`] is a tree of criteria rendered into a WHERE (or HAVING)
//! fragment at build time. Rendering pulls markers from a [`Placeholder`], so
//! the same tree produces `?`, `$1` or `@p1` depending on the target dialect.

use super::value::{SqlValue, ToSqlValue};
use crate::placeholder::Placeholder;

/// Options applied while rendering expressions and statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Qualifies bare field references as `<alias>.<field>`.
    pub table_alias: Option<String>,
}

impl RenderOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table alias.
    #[must_use]
    pub fn with_table_alias(mut self, alias: impl Into<String>) -> Self {
        self.table_alias = Some(alias.into());
        self
    }

    /// Qualifies `field` with the alias when it is a bare reference.
    #[must_use]
    pub fn qualify(&self, field: &str) -> String {
        qualify(self.table_alias.as_deref(), field)
    }
}

/// Literal keywords that look like identifiers but never name a column.
const LITERAL_KEYWORDS: [&str; 6] = [
    "NULL",
    "TRUE",
    "FALSE",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
];

/// Prefixes `field` with `alias` when it is a bare identifier. `*`, dotted
/// names, function calls and literal keywords are left alone, so prefixes
/// never stack.
fn qualify(alias: Option<&str>, field: &str) -> String {
    match alias {
        Some(alias) if is_bare_identifier(field) => format!("{alias}.{field}"),
        _ => String::from(field),
    }
}

fn is_bare_identifier(fragment: &str) -> bool {
    let mut chars = fragment.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !LITERAL_KEYWORDS
            .iter()
            .any(|kw| kw.eq_ignore_ascii_case(fragment))
}

/// A filter expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `field op marker`, binding one value.
    FieldCompare {
        field: String,
        operator: String,
        value: SqlValue,
    },
    /// `left op right` between two raw fragments. Nothing is bound.
    FieldExpression {
        left: String,
        operator: String,
        right: String,
    },
    /// `field IS NULL`
    IsNull { field: String },
    /// `field IS NOT NULL`
    IsNotNull { field: String },
    /// `field BETWEEN marker AND marker`
    Between {
        field: String,
        low: SqlValue,
        high: SqlValue,
    },
    /// Children joined with `joiner` (normally `AND`).
    And { children: Vec<Self>, joiner: String },
    /// Children joined with `joiner` (normally `OR`).
    Or { children: Vec<Self>, joiner: String },
}

impl Expr {
    /// Creates a comparison with an arbitrary operator.
    #[must_use]
    pub fn compare<V: ToSqlValue>(field: &str, operator: &str, value: V) -> Self {
        Self::FieldCompare {
            field: String::from(field),
            operator: String::from(operator),
            value: value.to_sql_value(),
        }
    }

    /// `field = value`
    #[must_use]
    pub fn eq<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, "=", value)
    }

    /// `field != value`
    #[must_use]
    pub fn ne<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, "!=", value)
    }

    /// `field > value`
    #[must_use]
    pub fn gt<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, ">", value)
    }

    /// `field >= value`
    #[must_use]
    pub fn gte<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, ">=", value)
    }

    /// `field < value`
    #[must_use]
    pub fn lt<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, "<", value)
    }

    /// `field <= value`
    #[must_use]
    pub fn lte<V: ToSqlValue>(field: &str, value: V) -> Self {
        Self::compare(field, "<=", value)
    }

    /// `field LIKE pattern`
    #[must_use]
    pub fn like(field: &str, pattern: &str) -> Self {
        Self::compare(field, "LIKE", pattern)
    }

    /// Compares two raw SQL fragments, e.g. `updated_at > created_at`.
    ///
    /// **Warning**: fragments are emitted verbatim. Never pass user input.
    #[must_use]
    pub fn expression(left: &str, operator: &str, right: &str) -> Self {
        Self::FieldExpression {
            left: String::from(left),
            operator: String::from(operator),
            right: String::from(right),
        }
    }

    /// `field IS NULL`
    #[must_use]
    pub fn is_null(field: &str) -> Self {
        Self::IsNull {
            field: String::from(field),
        }
    }

    /// `field IS NOT NULL`
    #[must_use]
    pub fn is_not_null(field: &str) -> Self {
        Self::IsNotNull {
            field: String::from(field),
        }
    }

    /// `field BETWEEN low AND high`
    #[must_use]
    pub fn between<L: ToSqlValue, H: ToSqlValue>(field: &str, low: L, high: H) -> Self {
        Self::Between {
            field: String::from(field),
            low: low.to_sql_value(),
            high: high.to_sql_value(),
        }
    }

    /// Conjunction of `children`.
    #[must_use]
    pub fn and(children: Vec<Self>) -> Self {
        Self::and_with("AND", children)
    }

    /// Disjunction of `children`.
    #[must_use]
    pub fn or(children: Vec<Self>) -> Self {
        Self::or_with("OR", children)
    }

    /// AND composite with a custom joiner literal.
    #[must_use]
    pub fn and_with(joiner: &str, children: Vec<Self>) -> Self {
        Self::And {
            children,
            joiner: String::from(joiner),
        }
    }

    /// OR composite with a custom joiner literal.
    #[must_use]
    pub fn or_with(joiner: &str, children: Vec<Self>) -> Self {
        Self::Or {
            children,
            joiner: String::from(joiner),
        }
    }

    /// ANDs together one equality per `(column, value)` pair.
    ///
    /// This is the explicit conversion for dynamically sourced filters.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        Self::and(
            pairs
                .into_iter()
                .map(|(k, v)| Self::eq(k.as_ref(), v))
                .collect(),
        )
    }

    /// Appends a child to a composite. Leaves are wrapped into an AND first.
    #[must_use]
    pub fn push(self, child: Self) -> Self {
        match self {
            Self::And {
                mut children,
                joiner,
            } => {
                children.push(child);
                Self::And { children, joiner }
            }
            Self::Or {
                mut children,
                joiner,
            } => {
                children.push(child);
                Self::Or { children, joiner }
            }
            leaf => Self::and(vec![leaf, child]),
        }
    }

    /// Returns true when the expression renders to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::And { children, .. } | Self::Or { children, .. } => {
                children.iter().all(Self::is_empty)
            }
            _ => false,
        }
    }

    /// Renders the expression.
    ///
    /// Value-bearing nodes render to `("", [])` when `placeholder` is `None`,
    /// so a filter may be probed before a generator exists. Empty composites
    /// render to `("", [])` and are skipped by their parents.
    #[must_use]
    pub fn build(
        &self,
        mut placeholder: Option<&mut (dyn Placeholder + '_)>,
        opts: &RenderOptions,
    ) -> (String, Vec<SqlValue>) {
        match self {
            Self::FieldCompare {
                field,
                operator,
                value,
            } => {
                let Some(gen) = placeholder else {
                    return (String::new(), vec![]);
                };
                let marker = gen.next_marker(field);
                (
                    format!("{} {operator} {marker}", opts.qualify(field)),
                    vec![value.clone()],
                )
            }
            Self::FieldExpression {
                left,
                operator,
                right,
            } => {
                (
                    format!("{} {operator} {}", opts.qualify(left), opts.qualify(right)),
                    vec![],
                )
            }
            Self::IsNull { field } => (format!("{} IS NULL", opts.qualify(field)), vec![]),
            Self::IsNotNull { field } => {
                (format!("{} IS NOT NULL", opts.qualify(field)), vec![])
            }
            Self::Between { field, low, high } => {
                let Some(gen) = placeholder else {
                    return (String::new(), vec![]);
                };
                let low_marker = gen.next_marker(field);
                let high_marker = gen.next_marker(field);
                (
                    format!(
                        "{} BETWEEN {low_marker} AND {high_marker}",
                        opts.qualify(field)
                    ),
                    vec![low.clone(), high.clone()],
                )
            }
            Self::And { children, joiner } | Self::Or { children, joiner } => {
                let mut parts = Vec::with_capacity(children.len());
                let mut params = vec![];
                for child in children {
                    let (sql, child_params) = child.build(placeholder.as_deref_mut(), opts);
                    if sql.is_empty() {
                        continue;
                    }
                    parts.push(format!("({sql})"));
                    params.extend(child_params);
                }
                (parts.join(&format!(" {joiner} ")), params)
            }
        }
    }
}
