//! Generic SQL dialect.

use super::Dialect;

/// A generic dialect using `?` markers and MySQL-style `LIMIT offset,count`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn pagination(&self, offset: u64, count: u64, _ordered: bool) -> Option<String> {
        Some(format!("LIMIT {offset},{count}"))
    }
}
