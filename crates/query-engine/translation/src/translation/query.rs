//! Finalize a menu template into an executable query.

use query_engine_sql::sql::helpers;
use query_engine_sql::sql::string::{Param, SQL};

use super::error::Error;
use super::templates::{Template, Templates};

/// Resolve a (domain, sub-option) pair and finalize the resulting template.
pub fn translate(
    templates: &Templates,
    domain: &str,
    sub: &str,
    crew_id: &str,
    month: Option<&str>,
) -> Result<SQL, Error> {
    let template = templates.lookup(domain, sub)?;
    finalize(template, crew_id, month)
}

/// Substitute the `{where}` placeholder and attach bind parameters.
///
/// Parameters are attached only when the finalized text references them, in
/// order of first occurrence, so positional binding matches the parameter
/// numbering SQLite assigns to named placeholders.
pub fn finalize(template: &Template, crew_id: &str, month: Option<&str>) -> Result<SQL, Error> {
    let mut text = template.as_str().to_string();

    if text.contains(helpers::WHERE_PLACEHOLDER) {
        if month.is_none() {
            return Err(Error::MonthRequired);
        }
        text = text.replace(helpers::WHERE_PLACEHOLDER, helpers::CREW_MONTH_PREDICATE);
    }

    let mut referenced = Vec::with_capacity(2);
    if let Some(at) = text.find(helpers::CREW_ID_PLACEHOLDER) {
        referenced.push((at, Param::CrewId(crew_id.to_string())));
    }
    if let Some(at) = text.find(helpers::MONTH_PLACEHOLDER) {
        let month = month.ok_or(Error::MonthRequired)?;
        referenced.push((at, Param::Month(month.to_string())));
    }
    referenced.sort_by_key(|(at, _)| *at);

    let mut sql = SQL::new(text);
    for (_, param) in referenced {
        sql.push_param(param);
    }
    Ok(sql)
}
