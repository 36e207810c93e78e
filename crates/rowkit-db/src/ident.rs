//! SQL identifier checks.
//!
//! Table and column names are interpolated into statement text, so they are
//! caller-trusted and never taken from end-user input. Before interpolation
//! every name is still checked against `[A-Za-z_][A-Za-z0-9_]*`, which rules
//! out quoting, whitespace, comments and statement separators.

use crate::error::{DbError, Result};

/// Returns `true` if `name` is a plain unquoted SQL identifier.
pub fn is_valid(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Checks a table name.
pub fn table(name: &str) -> Result<&str> {
    check("table", name)
}

/// Checks a column name.
pub fn column(name: &str) -> Result<&str> {
    check("column", name)
}

fn check<'a>(kind: &'static str, name: &'a str) -> Result<&'a str> {
    if is_valid(name) {
        Ok(name)
    } else {
        Err(DbError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}
