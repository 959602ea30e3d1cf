//! Translate an incoming menu selection to a finalized SQL string and its
//! bind parameters, ready to be run against the dataset.

pub mod error;
pub mod fallback;
pub mod query;
pub mod templates;
