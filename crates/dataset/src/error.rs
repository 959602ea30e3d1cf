//! Errors that occur while building the dataset.

use std::path::PathBuf;

use thiserror::Error;

/// A type for ingestion errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("source '{table}' has no files configured")]
    NoFiles { table: String },
    #[error("could not read source file {path}: {error}")]
    Csv { path: PathBuf, error: csv::Error },
    #[error("source file {path} does not share the header row of {first}")]
    HeaderMismatch { path: PathBuf, first: PathBuf },
    #[error("source '{table}' is missing join column '{column}'")]
    MissingJoinColumn { table: String, column: String },
    #[error("database error while building the dataset: {0}")]
    Database(#[from] sqlx::Error),
}
