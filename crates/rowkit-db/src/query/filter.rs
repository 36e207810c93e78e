//! Ordered column/value sets.
//!
//! A [`Filter`] is the Rust form of keyword-argument filters: an ordered list
//! of `(column, value)` pairs. The query builders walk it once and emit the
//! SQL fragment and the bound parameters in lockstep, so the n-th `?` always
//! binds the n-th value.

use rusqlite::types::Value;

use crate::{
    error::Result,
    ident,
    traits::{ColumnName, IntoValue},
};

/// Ordered mapping of column name to value.
///
/// Used as an equality filter by select/delete and as the `SET` list by
/// update (see [`Assignments`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    entries: Vec<(String, Value)>,
}

/// Column assignments for an `UPDATE`, in `SET` order.
pub type Assignments = Filter;

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `column = value`, keeping insertion order.
    pub fn eq<C: ColumnName, V: IntoValue>(mut self, column: C, value: V) -> Self {
        self.push(column, value);
        self
    }

    /// In-place form of [`Filter::eq`].
    pub fn push<C: ColumnName, V: IntoValue>(&mut self, column: C, value: V) {
        self.entries
            .push((column.column_name().to_string(), value.into_value()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(col, val)| (col.as_str(), val))
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> Vec<&str> {
        self.entries.iter().map(|(col, _)| col.as_str()).collect()
    }

    /// Builds `k1 = ? AND k2 = ? ...`, appending values to `params`.
    ///
    /// Returns `None` for an empty filter, since an empty conjunction is not
    /// valid SQL and callers drop the `WHERE` keyword instead.
    pub(crate) fn conjunction(&self, params: &mut Vec<Value>) -> Result<Option<String>> {
        if self.entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.joined(" AND ", params)?))
    }

    /// Builds `k1 = ?, k2 = ? ...`, appending values to `params`.
    pub(crate) fn assignments(&self, params: &mut Vec<Value>) -> Result<String> {
        self.joined(", ", params)
    }

    fn joined(&self, separator: &str, params: &mut Vec<Value>) -> Result<String> {
        let mut parts = Vec::with_capacity(self.entries.len());
        for (col, val) in &self.entries {
            parts.push(format!("{} = ?", ident::column(col)?));
            params.push(val.clone());
        }
        Ok(parts.join(separator))
    }
}

impl<C: ColumnName, V: IntoValue> FromIterator<(C, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut filter = Filter::new();
        for (col, val) in iter {
            filter.push(col, val);
        }
        filter
    }
}

impl<C: ColumnName, V: IntoValue> Extend<(C, V)> for Filter {
    fn extend<I: IntoIterator<Item = (C, V)>>(&mut self, iter: I) {
        for (col, val) in iter {
            self.push(col, val);
        }
    }
}
