//! SQL Server dialect.

use super::Dialect;
use crate::placeholder::PlaceholderStrategy;

/// SQL Server: `@pn` markers and `OFFSET .. FETCH NEXT`.
///
/// `OFFSET .. FETCH` is only valid after an ORDER BY, so the clause is
/// dropped for unordered statements.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sql_server"
    }

    fn placeholder(&self) -> PlaceholderStrategy {
        PlaceholderStrategy::at_p()
    }

    fn pagination(&self, offset: u64, count: u64, ordered: bool) -> Option<String> {
        ordered.then(|| format!("OFFSET {offset} ROWS FETCH NEXT {count} ROWS ONLY"))
    }
}
