//! Type definitions of a low-level SQL string representation.

use super::helpers;

/// A finalized SQL string together with the bind parameters it references.
///
/// Parameters are kept in order of first occurrence of their placeholder in
/// the SQL text, so that binding them positionally agrees with the parameter
/// numbering SQLite assigns to named placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
}

impl SQL {
    pub fn new(sql: String) -> SQL {
        SQL {
            sql,
            params: vec![],
        }
    }

    /// Record a parameter referenced by the SQL text.
    pub fn push_param(&mut self, param: Param) {
        self.params.push(param);
    }
}

/// A named bind parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// The crew identifier, bound wherever the SQL references `:crew_id`.
    CrewId(String),
    /// The year-month filter value, bound wherever the SQL references `:month`.
    Month(String),
}

impl Param {
    /// The named placeholder this parameter binds to in the SQL text.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Param::CrewId(_) => helpers::CREW_ID_PLACEHOLDER,
            Param::Month(_) => helpers::MONTH_PLACEHOLDER,
        }
    }

    /// The bound value.
    pub fn value(&self) -> &str {
        match self {
            Param::CrewId(value) | Param::Month(value) => value,
        }
    }
}
