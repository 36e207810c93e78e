//! Represents a typed database column.
//!
//! `Col<T>` ties a column name to a Rust type `T`. It implements
//! [`ColumnName`], so it can be used anywhere a filter or assignment key is
//! expected, alongside plain strings.

use std::marker::PhantomData;

use crate::traits::ColumnName;

/// A typed reference to a database column.
///
/// The type parameter `T` documents the expected Rust type of the column; it
/// is not enforced at runtime.
///
/// # Example
///
/// ```rust
/// use rowkit_db::expr::Col;
/// const STATUS: Col<String> = Col::new("status");
/// assert_eq!(STATUS.name, "status");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Col<T> {
    pub name: &'static str,
    _type: PhantomData<T>,
}

impl<T> Col<T> {
    /// Creates a new column reference.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }
}

impl<T> ColumnName for Col<T> {
    fn column_name(&self) -> &str {
        self.name
    }
}
