//! Document store dialect.
//!
//! Cosmos-style SQL addresses every property through the container alias
//! (`SELECT c.name FROM items c WHERE c.id = @p1`) and paginates with
//! `OFFSET .. LIMIT`. Queries spanning partitions must opt in explicitly.

use super::Dialect;
use crate::placeholder::PlaceholderStrategy;

/// Alias used when the caller does not provide one.
pub const DEFAULT_ALIAS: &str = "c";

#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentStoreDialect;

impl Dialect for DocumentStoreDialect {
    fn name(&self) -> &'static str {
        "document_store"
    }

    fn placeholder(&self) -> PlaceholderStrategy {
        PlaceholderStrategy::at_p()
    }

    fn pagination(&self, offset: u64, count: u64, _ordered: bool) -> Option<String> {
        Some(format!(
            "OFFSET {offset} LIMIT {count} WITH cross_partition=true"
        ))
    }

    fn default_table_alias(&self) -> Option<&'static str> {
        Some(DEFAULT_ALIAS)
    }
}
