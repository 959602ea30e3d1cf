//! Tests for source ingestion and the dataset merge.

use similar_asserts::assert_eq;
use sqlx::Row;

use crewchat_dataset::error::Error;
use crewchat_dataset::ingest::{initialize, load};
use crewchat_dataset::source::SourceTable;
use crewchat_configuration::SourcePaths;

const MILEAGE_TDL: &str = "\
CREW_ID_V,DATE_TIME_D,SLOT_NUMBER_N,HQ_CODE_C,TOTAL_KMS,FOOT_PLT_KM,NGHT
C123,2024-05-03,1,TDL,120.5,80,1
C123,2024-05-10,1,TDL,100,20,0
";

const MILEAGE_BSP: &str = "\
CREW_ID_V,DATE_TIME_D,SLOT_NUMBER_N,HQ_CODE_C,TOTAL_KMS,FOOT_PLT_KM,NGHT
C777,2024-05-04,2,BSP,70,70,1
";

const CREW: &str = "\
CREW_ID_V,NAME_V,HQ_CODE_C,MOBILE_NO_N
C123,A KUMAR,ZZZ,9999
";

const SLOT: &str = "\
SLOT_NUMBER_N,HQ_CODE_C,MONTH_HRS_FROM_DATE_D,MONTH_HRS_TO_DATE_D
1,TDL,2024-05-01,2024-05-31
";

fn write_sources(directory: &std::path::Path) -> SourcePaths {
    let mileage_tdl = directory.join("mileage_tdl.csv");
    let mileage_bsp = directory.join("mileage_bsp.csv");
    let crew = directory.join("crew.csv");
    let slot = directory.join("slot.csv");

    std::fs::write(&mileage_tdl, MILEAGE_TDL).unwrap();
    std::fs::write(&mileage_bsp, MILEAGE_BSP).unwrap();
    std::fs::write(&crew, CREW).unwrap();
    std::fs::write(&slot, SLOT).unwrap();

    SourcePaths {
        mileage: vec![mileage_tdl, mileage_bsp],
        crew,
        slot,
    }
}

#[tokio::test]
async fn merges_all_three_sources() {
    let directory = tempfile::tempdir().unwrap();
    let pool = initialize(&write_sources(directory.path())).await.unwrap();

    let row_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM full_data")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(row_count, 3);

    // Biodata and slot windows are joined onto the matching mileage rows.
    let row = sqlx::query(
        "SELECT NAME_V, HQ_CODE_C, MONTH_HRS_FROM_DATE_D FROM full_data \
         WHERE CREW_ID_V = 'C123' LIMIT 1",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(row.get::<Option<String>, _>("NAME_V"), Some("A KUMAR".to_string()));
    assert_eq!(
        row.get::<Option<String>, _>("MONTH_HRS_FROM_DATE_D"),
        Some("2024-05-01".to_string())
    );
    // The mileage sheet's headquarters code wins over the biodata copy.
    assert_eq!(row.get::<String, _>("HQ_CODE_C"), "TDL");
}

#[tokio::test]
async fn left_joins_preserve_unmatched_mileage_rows() {
    let directory = tempfile::tempdir().unwrap();
    let pool = initialize(&write_sources(directory.path())).await.unwrap();

    let row = sqlx::query(
        "SELECT NAME_V, MONTH_HRS_FROM_DATE_D FROM full_data WHERE CREW_ID_V = 'C777'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(row.get::<Option<String>, _>("NAME_V"), None);
    assert_eq!(row.get::<Option<String>, _>("MONTH_HRS_FROM_DATE_D"), None);
}

#[tokio::test]
async fn numeric_columns_sum_numerically() {
    let directory = tempfile::tempdir().unwrap();
    let pool = initialize(&write_sources(directory.path())).await.unwrap();

    let total_kms: f64 = sqlx::query_scalar("SELECT SUM(TOTAL_KMS) FROM full_data")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total_kms, 290.5);

    let night_duty: i64 = sqlx::query_scalar("SELECT SUM(NGHT) FROM full_data")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(night_duty, 2);
}

#[tokio::test]
async fn staging_tables_are_dropped() {
    let directory = tempfile::tempdir().unwrap();
    let pool = initialize(&write_sources(directory.path())).await.unwrap();

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(tables, vec!["full_data".to_string()]);
}

#[tokio::test]
async fn mismatched_depot_headers_are_rejected() {
    let directory = tempfile::tempdir().unwrap();
    let mut sources = write_sources(directory.path());

    let odd = directory.path().join("mileage_odd.csv");
    std::fs::write(&odd, "CREW_ID_V,SOMETHING_ELSE\nC1,x\n").unwrap();
    sources.mileage.push(odd);

    let err = initialize(&sources).await.unwrap_err();
    assert!(matches!(err, Error::HeaderMismatch { .. }));
}

#[tokio::test]
async fn sources_must_carry_their_join_columns() {
    let mileage = SourceTable {
        name: "mileage".to_string(),
        columns: ["CREW_ID_V", "SLOT_NUMBER_N", "HQ_CODE_C"]
            .map(str::to_string)
            .to_vec(),
        rows: vec![],
    };
    let crew = SourceTable {
        name: "crew".to_string(),
        columns: vec!["NAME_V".to_string()],
        rows: vec![],
    };
    let slot = SourceTable {
        name: "slot".to_string(),
        columns: ["SLOT_NUMBER_N", "HQ_CODE_C"].map(str::to_string).to_vec(),
        rows: vec![],
    };

    let err = load(&mileage, &crew, &slot).await.unwrap_err();
    assert!(matches!(
        err,
        Error::MissingJoinColumn { ref table, ref column } if table == "crew" && column == "CREW_ID_V"
    ));
}
