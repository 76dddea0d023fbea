//! `PostgreSQL` dialect.

use super::Dialect;
use crate::placeholder::PlaceholderStrategy;

/// `PostgreSQL`: `$n` markers, `LIMIT count OFFSET offset`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self) -> PlaceholderStrategy {
        PlaceholderStrategy::dollar()
    }

    fn pagination(&self, offset: u64, count: u64, _ordered: bool) -> Option<String> {
        Some(format!("LIMIT {count} OFFSET {offset}"))
    }
}
