//! Statement builders.
//!
//! Each builder is configured through consuming `with_*` methods and renders
//! a `(sql, values)` pair. Values never appear in the SQL text.

mod delete;
mod expr;
mod insert;
mod select;
mod sort;
mod update;
mod value;

pub use delete::Delete;
pub use expr::{Expr, RenderOptions};
pub use insert::Insert;
pub use select::Select;
pub use sort::{Direction, Sorting};
pub use update::Update;
pub use value::{Record, SqlValue, ToSqlValue};
