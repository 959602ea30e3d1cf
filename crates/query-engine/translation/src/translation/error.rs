//! Errors for query translation.

use thiserror::Error;

/// A type for translation errors.
///
/// Unknown domain and unknown sub-option are distinct variants so callers can
/// report which part of the request was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown query domain '{0}'")]
    UnknownDomain(String),
    #[error("unknown sub-option '{sub}' in domain '{domain}'")]
    UnknownSubOption { domain: String, sub: String },
    #[error("a month value is required for this query")]
    MonthRequired,
}
