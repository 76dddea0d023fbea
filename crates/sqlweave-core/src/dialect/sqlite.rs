//! `SQLite` dialect.

use super::Dialect;

/// `SQLite` accepts `?` markers and the two-argument `LIMIT offset,count` form.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn pagination(&self, offset: u64, count: u64, _ordered: bool) -> Option<String> {
        Some(format!("LIMIT {offset},{count}"))
    }
}
