#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use sqlweave_core::{Expr, Record, SqlValue};
use sqlweave_repo::{KeyColumns, RecordMapper, Repository, RepositoryOptions, SerdeMapper};
use sqlweave_sqlite::SqliteExecutor;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Single-connection in-memory database with a `users` table keyed by a
/// unique email.
pub async fn create_test_pool() -> SqlitePool {
    init_tracing();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(":memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");

    sqlx::query(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            active BOOLEAN NOT NULL DEFAULT 1
        )",
    )
    .execute(&pool)
    .await
    .expect("Failed to create users table");

    pool
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(email: &str, name: &str) -> Self {
        Self {
            id: None,
            email: String::from(email),
            name: String::from(name),
        }
    }
}

pub type UserRepo = Repository<User, SqliteExecutor, SerdeMapper<User>, fn(&User) -> Expr>;

pub fn by_email(user: &User) -> Expr {
    Expr::eq("email", user.email.as_str())
}

pub fn user_repo(pool: &SqlitePool, options: RepositoryOptions) -> UserRepo {
    sqlweave_sqlite::repository(
        pool.clone(),
        SerdeMapper::new().with_columns(&["id", "email", "name"]),
        by_email as fn(&User) -> Expr,
        options,
    )
}

pub type RecordRepo = Repository<Record, SqliteExecutor, RecordMapper, KeyColumns>;

pub fn record_repo(pool: &SqlitePool, options: RepositoryOptions) -> RecordRepo {
    sqlweave_sqlite::repository(
        pool.clone(),
        RecordMapper::default(),
        KeyColumns::new(&["email"]),
        options,
    )
}

pub fn record(email: &str, name: &str, active: bool) -> Record {
    Record::from([
        (String::from("email"), SqlValue::Text(String::from(email))),
        (String::from("name"), SqlValue::Text(String::from(name))),
        (String::from("active"), SqlValue::Bool(active)),
    ])
}
