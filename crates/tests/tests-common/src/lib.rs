//! Shared fixtures for integration tests: an in-memory dataset seeded with a
//! couple of crews across two months and both depots.

use sqlx::sqlite::SqlitePool;

use crewchat_dataset::ingest::load;
use crewchat_dataset::source::SourceTable;

/// Build the seeded dataset pool the way the server does at startup.
pub async fn seeded_pool() -> SqlitePool {
    load(&mileage_table(), &crew_table(), &slot_table())
        .await
        .expect("seed dataset")
}

pub fn mileage_table() -> SourceTable {
    table(
        "mileage",
        &[
            "CREW_ID_V",
            "DATE_TIME_D",
            "SLOT_NUMBER_N",
            "HQ_CODE_C",
            "TOTAL_KMS",
            "FOOT_PLT_KM",
            "NGHT",
            "SICK_LEAVE",
            "OTHER_NON_LEAVE",
            "LEAVE_DAYS",
            "ABSENT",
        ],
        &[
            &["C123", "2024-05-03", "1", "TDL", "120.5", "80", "1", "1", "0", "2", "0"],
            &["C123", "2024-05-10", "1", "TDL", "100", "20", "0", "0", "1", "0", "1"],
            &["C123", "2024-06-01", "1", "TDL", "50", "10", "1", "0", "0", "0", "0"],
            &["C777", "2024-05-04", "2", "BSP", "70", "70", "1", "0", "0", "1", "0"],
        ],
    )
}

pub fn crew_table() -> SourceTable {
    table(
        "crew",
        &[
            "CREW_ID_V",
            "NAME_V",
            "CREW_CADRE_V",
            "CREW_DESIG_V",
            "MOBILE_NO_N",
            "HQ_CODE_C",
        ],
        &[
            &["C123", "A KUMAR", "GOODS", "LP", "9999000001", "TDL"],
            &["C777", "B SINGH", "COACHING", "ALP", "9999000002", "BSP"],
        ],
    )
}

pub fn slot_table() -> SourceTable {
    table(
        "slot",
        &[
            "SLOT_NUMBER_N",
            "HQ_CODE_C",
            "MONTH_HRS_FROM_DATE_D",
            "MONTH_HRS_TO_DATE_D",
        ],
        &[
            &["1", "TDL", "2024-05-01", "2024-05-31"],
            &["2", "BSP", "2024-05-01", "2024-05-31"],
        ],
    )
}

fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> SourceTable {
    SourceTable {
        name: name.to_string(),
        columns: columns.iter().map(|column| (*column).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_empty() {
                            None
                        } else {
                            Some((*cell).to_string())
                        }
                    })
                    .collect()
            })
            .collect(),
    }
}
