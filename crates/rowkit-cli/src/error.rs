//! Error types for the rowkit binary.

use miette::Diagnostic;
use rowkit_config::error::ConfigError;
use rowkit_db::DbError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),

    #[error("Error while {action}")]
    #[diagnostic(code(rowkit::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(rowkit::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid argument `{0}`")]
    #[diagnostic(
        code(rowkit::invalid_argument),
        help("Use the form column=value, e.g. status=done")
    )]
    InvalidPair(String),

    #[error("Could not open database at {0}")]
    #[diagnostic(
        code(rowkit::database),
        help("Run with -v for details, or point --db at a writable location")
    )]
    DatabaseUnavailable(String),
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            CliError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
