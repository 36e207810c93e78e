//! Dynamic predicate query builder over SQLite.
//!
//! The entry points most callers need are the table-generic operations in
//! [`ops`] ([`select_where`], [`update`], [`delete_where`], [`delete_all`]),
//! the fixed-shape inserts in [`repository`], and [`DbConnection`].
//!
//! ```rust
//! use rowkit_db::{add_project, filter, schema, select_where, DbConnection};
//!
//! let db = DbConnection::open_in_memory().unwrap();
//! schema::create_projects_and_tasks(&db).unwrap();
//!
//! let id = add_project(&db, ("English review", "2020-05-11", "2020-05-13")).unwrap();
//! let rows = select_where(&db, "projects", &filter!(id = id)).unwrap();
//! assert_eq!(rows.len(), 1);
//! ```
//!
//! A [`DbConnection`] is shared by cloning and serializes statements; it is
//! one connection, not a pool.

pub mod connection;
pub mod error;
pub mod expr;
pub mod ident;
pub mod import;
pub mod macros;
pub mod models;
pub mod ops;
pub mod query;
pub mod repository;
pub mod schema;
pub mod traits;

pub use connection::{create_connection, probe_in_memory, DbConnection};
pub use error::{DbError, Result};
pub use ops::{delete_all, delete_where, select_all, select_where, update};
pub use query::*;
pub use repository::project::{add_project, add_task, select_task_by_status};
pub use rusqlite::types::Value;
pub use traits::{ColumnName, FromRow, IntoValue};
