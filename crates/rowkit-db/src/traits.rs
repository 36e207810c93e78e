//! Core traits that power the query builder.
//!
//! - [`FromRow`] converts database rows into Rust types.
//! - [`ColumnName`] names a column in a filter or assignment.
//! - [`IntoValue`] turns a Rust value into a bound parameter.

use rusqlite::{
    types::{Null, Value},
    Row,
};

/// A trait for types that can be constructed from a SQLite row.
///
/// Used by [`crate::SelectQuery::fetch`] to map query results.
///
/// # Example
///
/// ```rust
/// use rowkit_db::FromRow;
/// struct Project {
///     id: i64,
///     name: String
/// }
///
/// impl FromRow for Project {
///     fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
///         Ok(Project {
///             id: row.get("id")?,
///             name: row.get("name")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Anything that names a column: string slices, owned strings and [`crate::expr::Col`].
pub trait ColumnName {
    fn column_name(&self) -> &str;
}

impl ColumnName for &str {
    fn column_name(&self) -> &str {
        self
    }
}

impl ColumnName for String {
    fn column_name(&self) -> &str {
        self.as_str()
    }
}

/// Conversion into a bound SQL parameter.
///
/// Covers the primitive values a filter or assignment can carry: integers,
/// reals, text, blobs and `NULL` (via `None` or [`rusqlite::types::Null`]).
pub trait IntoValue {
    fn into_value(self) -> Value;
}

macro_rules! into_value_via_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

into_value_via_from!(
    i8, i16, i32, i64, isize, u8, u16, u32, f32, f64, bool, String, Vec<u8>, Null, Value,
);

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl IntoValue for &String {
    fn into_value(self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }
}
