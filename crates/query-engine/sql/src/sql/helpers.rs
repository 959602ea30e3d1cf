//! SQL text fragments shared between translation and execution.

/// Placeholder in menu templates that stands for the crew-and-month filter.
pub const WHERE_PLACEHOLDER: &str = "{where}";

/// Named parameter referencing the crew identifier.
pub const CREW_ID_PLACEHOLDER: &str = ":crew_id";

/// Named parameter referencing the year-month filter value.
pub const MONTH_PLACEHOLDER: &str = ":month";

/// The predicate substituted for [`WHERE_PLACEHOLDER`]: match one crew and
/// keep rows whose timestamp falls in the requested year-month.
pub const CREW_MONTH_PREDICATE: &str =
    "CREW_ID_V = :crew_id AND STRFTIME('%Y-%m', DATE_TIME_D) = :month";
