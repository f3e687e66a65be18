//! Error types for catalog operations.
//!
//! Every failure falls into one of three kinds: the store could not be
//! opened, a statement failed, or the store rejected a write because it
//! violated a uniqueness or foreign-key constraint.

use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The database could not be opened or closed.
    #[error("catalog connection error for '{}': {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed for a reason other than a constraint violation.
    #[error("query error: {0}")]
    Query(rusqlite::Error),

    /// A primary-key, uniqueness, or foreign-key constraint was violated.
    #[error("constraint violation: {0}")]
    Constraint(rusqlite::Error),
}

impl CatalogError {
    /// Returns `true` for [`CatalogError::Constraint`].
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => Self::Constraint(err),
            _ => Self::Query(err),
        }
    }
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
