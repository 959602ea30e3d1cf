//! Errors for query execution.

use thiserror::Error;

/// A type for execution errors.
///
/// Execution failures of any kind (malformed SQL, type mismatch, missing
/// column) carry the underlying database error text and are never retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Query(#[from] sqlx::Error),
}
