//! Error types for rowkit-db.

use miette::Diagnostic;
use thiserror::Error;

/// Database error type for rowkit-db operations.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Database connection failed: {0}")]
    #[diagnostic(
        code(rowkit_db::connection),
        help("Check if the database file path exists and is writable")
    )]
    ConnectionError(String),

    #[error("Database query failed: {0}")]
    #[diagnostic(
        code(rowkit_db::query),
        help("Check the table and column names used in the statement")
    )]
    QueryError(#[from] rusqlite::Error),

    #[error("Invalid {kind} identifier: `{name}`")]
    #[diagnostic(
        code(rowkit_db::identifier),
        help("Identifiers must match [A-Za-z_][A-Za-z0-9_]*")
    )]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("Update of `{0}` has no columns to set")]
    #[diagnostic(
        code(rowkit_db::empty_assignment),
        help("Pass at least one column=value assignment")
    )]
    EmptyAssignment(String),

    #[error("Refusing to delete from `{0}` without a filter")]
    #[diagnostic(
        code(rowkit_db::empty_filter),
        help("Use delete_all to remove every row from a table")
    )]
    EmptyFilter(String),

    #[error("Invalid value `{value}` for column `{column}` on line {line}")]
    #[diagnostic(
        code(rowkit_db::invalid_field),
        help("Check the input file for malformed numbers or dates")
    )]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("CSV error: {0}")]
    #[diagnostic(code(rowkit_db::csv), help("Check the input file's header and quoting"))]
    Csv(#[from] csv::Error),

    #[error("Database connection lock was poisoned")]
    #[diagnostic(
        code(rowkit_db::poison),
        help("A previous statement panicked while holding the connection")
    )]
    Poisoned,

    #[error("IO error: {0}")]
    #[diagnostic(code(rowkit_db::io), help("Check file permissions and disk space"))]
    IoError(#[from] std::io::Error),
}

/// Result type alias for rowkit-db operations.
pub type Result<T> = std::result::Result<T, DbError>;
