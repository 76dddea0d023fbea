//! Oracle dialect.

use super::Dialect;
use crate::placeholder::PlaceholderStrategy;

/// Oracle 12c+: `:n` markers and `OFFSET .. FETCH NEXT`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn placeholder(&self) -> PlaceholderStrategy {
        PlaceholderStrategy::colon()
    }

    fn pagination(&self, offset: u64, count: u64, _ordered: bool) -> Option<String> {
        Some(format!("OFFSET {offset} ROWS FETCH NEXT {count} ROWS ONLY"))
    }
}
