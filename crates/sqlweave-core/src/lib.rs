//! # sqlweave-core
//!
//! Dialect-aware SQL statement builders.
//!
//! This crate provides:
//! - Composable filter expressions ([`Expr`]) rendered with bound values
//! - SELECT, INSERT, UPDATE and DELETE builders
//! - Per-flavor parameter markers and pagination syntax
//!
//! ## Building a query
//!
//! ```rust
//! use sqlweave_core::{Expr, Flavor, RenderOptions, Select, Sorting, SqlValue};
//!
//! let (sql, params) = Select::new("users")
//!     .with_columns(&["id", "name"])
//!     .with_flavor(Flavor::Postgres)
//!     .with_filter(Expr::and(vec![Expr::eq("active", true), Expr::gt("age", 18)]))
//!     .with_sort(Sorting::parse("name ASC"))
//!     .with_limit(10)
//!     .build(&RenderOptions::default());
//!
//! assert_eq!(
//!     sql,
//!     "SELECT id,name FROM users WHERE (active = $1) AND (age > $2) ORDER BY name ASC LIMIT 10 OFFSET 0"
//! );
//! assert_eq!(params, vec![SqlValue::Bool(true), SqlValue::Int(18)]);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are always parameterized:
//!
//! ```rust
//! use sqlweave_core::{Expr, RenderOptions, Select};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let (sql, params) = Select::new("users")
//!     .with_filter(Expr::eq("name", user_input))
//!     .build(&RenderOptions::default());
//!
//! assert_eq!(sql, "SELECT * FROM users WHERE name = ?");
//! assert_eq!(params.len(), 1);
//! ```
//!
//! Identifiers (tables, columns, operators, raw expressions) are emitted
//! verbatim and must never come from untrusted input.

pub mod builder;
pub mod dialect;
pub mod error;
pub mod placeholder;

pub use builder::{
    Delete, Direction, Expr, Insert, Record, RenderOptions, Select, Sorting, SqlValue, ToSqlValue,
    Update,
};
pub use dialect::{Dialect, Flavor};
pub use error::{BuildError, Result};
pub use placeholder::{Placeholder, PlaceholderStrategy};
