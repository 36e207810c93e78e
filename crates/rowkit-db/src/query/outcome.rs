//! Result of operations that log failures instead of returning them.

use tracing::error;

use crate::error::{DbError, Result};

/// What happened to a swallow-and-log statement.
///
/// Update and delete operations never abort the caller: a failure is logged
/// and handed back as [`Outcome::Failed`] for callers that want to inspect it.
#[derive(Debug)]
pub enum Outcome {
    /// The statement ran and was committed.
    Done { affected: usize },
    /// The statement failed; the error has already been logged.
    Failed { error: DbError },
}

impl Outcome {
    /// Logs the error (if any) and wraps the result.
    pub(crate) fn record(result: Result<usize>) -> Self {
        match result {
            Ok(affected) => Outcome::Done { affected },
            Err(err) => {
                error!("{err}");
                Outcome::Failed { error: err }
            }
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done { .. })
    }

    /// Rows affected, or `None` on failure.
    pub fn affected(&self) -> Option<usize> {
        match self {
            Outcome::Done { affected } => Some(*affected),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&DbError> {
        match self {
            Outcome::Done { .. } => None,
            Outcome::Failed { error } => Some(error),
        }
    }
}
