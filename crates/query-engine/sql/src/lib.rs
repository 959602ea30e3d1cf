//! SQL value types shared by the query translation and execution phases.

pub mod sql;
