//! The static menu of supported queries.
//!
//! A two-level lookup: domain code → sub-option code → SQL template. The menu
//! is built once at startup and immutable for the life of the process.

use std::collections::BTreeMap;

use query_engine_sql::sql::helpers;

use super::error::Error;

/// A parameterized SQL string from the menu.
///
/// A template either contains no placeholder (self-contained, filtered only by
/// crew id) or contains `{where}`, which finalization replaces with the fixed
/// crew-and-month predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template(&'static str);

impl Template {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Whether finalizing this template needs a month value.
    pub fn requires_month(&self) -> bool {
        self.0.contains(helpers::WHERE_PLACEHOLDER) || self.0.contains(helpers::MONTH_PLACEHOLDER)
    }
}

/// One query domain: a label and its sub-options.
#[derive(Debug, Clone)]
pub struct Domain {
    pub label: &'static str,
    options: BTreeMap<&'static str, Template>,
}

/// The template table.
#[derive(Debug, Clone)]
pub struct Templates {
    domains: BTreeMap<&'static str, Domain>,
}

impl Templates {
    /// Look up the template for a (domain, sub-option) pair, distinguishing an
    /// invalid domain from a valid domain with an invalid sub-option.
    pub fn lookup(&self, domain: &str, sub: &str) -> Result<&Template, Error> {
        let entry = self
            .domains
            .get(domain)
            .ok_or_else(|| Error::UnknownDomain(domain.to_string()))?;
        entry.options.get(sub).ok_or_else(|| Error::UnknownSubOption {
            domain: domain.to_string(),
            sub: sub.to_string(),
        })
    }

    pub fn domain(&self, domain: &str) -> Option<&Domain> {
        self.domains.get(domain)
    }

    /// Every (domain, sub-option, template) triple in the menu.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str, &Template)> {
        self.domains.iter().flat_map(|(domain, entry)| {
            entry
                .options
                .iter()
                .map(move |(sub, template)| (*domain, *sub, template))
        })
    }

    /// The standard crew-scheduling menu.
    pub fn standard() -> Templates {
        let domains = BTreeMap::from([
            (
                "1",
                make_domain(
                    "Leave Info",
                    &[
                        ("1", "SELECT SUM(SICK_LEAVE) AS SICK_LEAVE FROM full_data WHERE {where}"),
                        ("2", "SELECT SUM(ABSENT) AS ABSENT FROM full_data WHERE {where}"),
                        ("3", "SELECT SUM(OTHER_NON_LEAVE) AS OTHER_NON_LEAVE FROM full_data WHERE {where}"),
                        ("4", "SELECT SUM(LEAVE_DAYS) AS LEAVE_DAYS FROM full_data WHERE {where}"),
                        ("5", "SELECT SUM(SICK_LEAVE + OTHER_NON_LEAVE + LEAVE_DAYS + ABSENT) AS TOTAL_LEAVE FROM full_data WHERE {where}"),
                    ],
                ),
            ),
            (
                "2",
                make_domain(
                    "Duty Info",
                    &[
                        ("1", "SELECT SUM(TOTAL_DUTY) AS TOTAL_DUTY FROM full_data WHERE {where}"),
                        ("2", "SELECT SUM(RUN_DUTY_MIN) AS RUN_DUTY FROM full_data WHERE {where}"),
                        ("3", "SELECT SUM(NON_RUN_DUTY_MIN) AS NON_RUN_DUTY FROM full_data WHERE {where}"),
                        ("4", "SELECT SUM(STATIONAY_DUTY) AS STATIONARY_DUTY FROM full_data WHERE {where}"),
                        ("5", "SELECT SUM(SPARE_DUTY_MINS_N) AS SPARE_DUTY_MINS, SUM(SPARE_KMS_N) AS SPARE_KMS FROM full_data WHERE {where}"),
                        ("6", "SELECT SUM(BOR) AS BREACH_OF_REST FROM full_data WHERE {where}"),
                        ("7", "SELECT SUM(NGHT) AS NIGHT_DUTY FROM full_data WHERE {where}"),
                        ("8", "SELECT SUM(TEST_TRNG) AS TEST_TRAINING FROM full_data WHERE {where}"),
                        ("9", "SELECT SUM(RRA) AS RRA FROM full_data WHERE {where}"),
                        ("10", "SELECT DISTINCT TENTATIVE_FLAG FROM full_data WHERE CREW_ID_V = :crew_id"),
                        ("11", "SELECT SUM(SHUNT_COUNT) AS SHUNTING_DUTY_COUNT FROM full_data WHERE {where}"),
                    ],
                ),
            ),
            (
                "3",
                make_domain(
                    "KMs Summary",
                    &[
                        ("1", "SELECT SUM(TOTAL_KMS) AS TOTAL_KMS FROM full_data WHERE {where}"),
                        ("2", "SELECT SUM(FOOT_PLT_KM) AS FOOTPLATE_KMS FROM full_data WHERE {where}"),
                        ("3", "SELECT SUM(TOTAL_KMS - COALESCE(FOOT_PLT_KM, 0)) AS FREIGHT_KMS FROM full_data WHERE {where}"),
                        ("4", "SELECT SUM(NRDA_KMS) AS NRDA_KMS FROM full_data WHERE {where}"),
                        ("5", "SELECT SUM(OSRA_KMS) AS OSRA_KMS FROM full_data WHERE {where}"),
                        ("6", "SELECT SUM(COACH_FOOT_PLT_KM_N) AS COACH_KM, SUM(COACH_RUN_DUTY_MIN_N) AS COACH_MIN FROM full_data WHERE {where}"),
                        ("7", "SELECT SUM(OFF1_KMS + OFF2_KMS) AS OFF_DUTY_KMS FROM full_data WHERE {where}"),
                        ("8", "SELECT SUM(ALKM_NON_LEAVE) AS AUTH_LEAVE_KMS FROM full_data WHERE {where}"),
                        ("9", "SELECT SUM(ALKM_LEAVE) AS ALKM_LEAVE_KMS FROM full_data WHERE {where}"),
                    ],
                ),
            ),
            (
                "4",
                make_domain(
                    "Trip Info",
                    &[
                        ("1", "SELECT SUM(NO_OF_TRIPS_N) AS NO_OF_TRIPS FROM full_data WHERE {where}"),
                        ("2", "SELECT SUM(TRIP_COUNT) AS TRIP_COUNT FROM full_data WHERE {where}"),
                    ],
                ),
            ),
            (
                "5",
                make_domain(
                    "Crew Info",
                    &[
                        ("1", "SELECT NAME_V, CREW_CADRE_V, CREW_DESIG_V, MOBILE_NO_N, HQ_CODE_C FROM full_data WHERE CREW_ID_V = :crew_id LIMIT 1"),
                        ("2", "SELECT AU_CODE_V, PF_CODE_N, LI_ID_V FROM full_data WHERE CREW_ID_V = :crew_id LIMIT 1"),
                        ("3", "SELECT ORG_TYPE_C, TRCTN_C, IPAS_FLAG_C, ALCOHOL_C, FLAG_C FROM full_data WHERE CREW_ID_V = :crew_id LIMIT 1"),
                        ("4", "SELECT INACTIVE_STTS_V, INACTIVE_RESN_V FROM full_data WHERE CREW_ID_V = :crew_id LIMIT 1"),
                        ("5", "SELECT VALID_FROM_DATETIME_D, VALID_TO_DATETIME_D FROM full_data WHERE CREW_ID_V = :crew_id LIMIT 1"),
                        ("6", "SELECT EMP_NO_V, CREW_BASE_ID_V FROM full_data WHERE CREW_ID_V = :crew_id LIMIT 1"),
                    ],
                ),
            ),
            (
                "6",
                make_domain(
                    "Location & Time Info",
                    &[
                        ("1", "SELECT HQ_CODE_C, SUM(TOTAL_DUTY) AS DUTY, SUM(TOTAL_KMS) AS KMS FROM full_data WHERE {where} GROUP BY HQ_CODE_C"),
                        ("2", "SELECT STRFTIME('%Y-%m', DATE_TIME_D) AS MONTH, SUM(TOTAL_DUTY) AS TOTAL_DUTY, SUM(TOTAL_KMS) AS TOTAL_KMS, SUM(NO_OF_TRIPS_N) AS TOTAL_TRIPS FROM full_data WHERE CREW_ID_V = :crew_id GROUP BY MONTH ORDER BY MONTH"),
                        ("3", "SELECT NH_DATES, SUM(NH) AS NH_COUNT FROM full_data WHERE {where} GROUP BY NH_DATES"),
                        ("4", "SELECT DISTINCT SLOT_NUMBER_N, MONTH_HRS_FROM_DATE_D, MONTH_HRS_TO_DATE_D FROM full_data WHERE CREW_ID_V = :crew_id"),
                    ],
                ),
            ),
        ]);

        Templates { domains }
    }
}

fn make_domain(label: &'static str, options: &[(&'static str, &'static str)]) -> Domain {
    Domain {
        label,
        options: options
            .iter()
            .map(|&(sub, template)| (sub, Template(template)))
            .collect(),
    }
}
