//! Translate menu selections and free-text questions into executable queries
//! against the crew dataset.

pub mod translation;
