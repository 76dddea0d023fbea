//! Uniqueness violations reported by SQLite.

use std::error::Error;

use sqlweave_repo::DuplicateKeyClassifier;

/// Recognizes `UNIQUE` and `PRIMARY KEY` constraint failures raised through
/// sqlx.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDuplicateClassifier;

impl DuplicateKeyClassifier for SqliteDuplicateClassifier {
    fn is_duplicate(&self, err: &(dyn Error + 'static)) -> bool {
        match err.downcast_ref::<sqlx::Error>() {
            Some(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}
