//! The query builder.
//!
//! Each statement kind has its own builder with chainable methods. All of
//! them produce a SQL string plus a parameter vector whose length equals the
//! number of `?` placeholders, in the same order.
//!
//! - [`SelectQuery`]: `SELECT * FROM t [WHERE ...] [ORDER BY ...] [LIMIT n]`
//! - [`InsertQuery`]: `INSERT INTO t(c, ...) VALUES (?, ...)`
//! - [`UpdateQuery`]: `UPDATE t SET c = ?, ... WHERE id = ?`
//! - [`DeleteQuery`]: `DELETE FROM t [WHERE ...]`
//!
//! Table and column names are interpolated into the text after passing
//! [`crate::ident`] checks; values are always bound.

pub(crate) mod clause;
pub mod delete;
pub mod filter;
pub mod insert;
pub mod outcome;
pub mod select;
pub mod update;

pub use delete::DeleteQuery;
pub use filter::{Assignments, Filter};
pub use insert::InsertQuery;
pub use outcome::Outcome;
pub use select::SelectQuery;
pub use update::UpdateQuery;
