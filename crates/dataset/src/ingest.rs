//! Stage the source tables into the in-memory database and merge them into
//! the denormalized `full_data` table every query runs against.

use std::collections::HashSet;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crewchat_configuration::SourcePaths;

use crate::error::Error;
use crate::source::SourceTable;

/// The shared dataset table name.
pub const DATASET_TABLE: &str = "full_data";

/// Crew identifier joining mileage to biodata.
const CREW_JOIN_KEY: &str = "CREW_ID_V";

/// Slot identifiers joining mileage to slot windows.
const SLOT_JOIN_KEYS: [&str; 2] = ["SLOT_NUMBER_N", "HQ_CODE_C"];

/// Read the configured sources and build the shared dataset. The returned
/// pool is treated as read-only by every request handler.
pub async fn initialize(sources: &SourcePaths) -> Result<SqlitePool, Error> {
    let mileage = SourceTable::from_csv_files("mileage", &sources.mileage)?;
    let crew = SourceTable::from_csv_file("crew", &sources.crew)?;
    let slot = SourceTable::from_csv_file("slot", &sources.slot)?;

    load(&mileage, &crew, &slot).await
}

/// Stage already-read source tables and merge them. Split out from
/// [`initialize`] so tests can seed the dataset without files on disk.
pub async fn load(
    mileage: &SourceTable,
    crew: &SourceTable,
    slot: &SourceTable,
) -> Result<SqlitePool, Error> {
    require_columns(mileage, &[CREW_JOIN_KEY, SLOT_JOIN_KEYS[0], SLOT_JOIN_KEYS[1]])?;
    require_columns(crew, &[CREW_JOIN_KEY])?;
    require_columns(slot, &SLOT_JOIN_KEYS)?;

    let pool = create_pool().await?;

    for table in [mileage, crew, slot] {
        stage(&pool, table).await?;
        tracing::info!(
            table = %table.name,
            rows = table.rows.len(),
            "staged source table"
        );
    }

    merge(&pool, mileage, crew, slot).await?;

    for table in [mileage, crew, slot] {
        sqlx::query(&format!("DROP TABLE {}", quote_identifier(&table.name)))
            .execute(&pool)
            .await?;
    }

    Ok(pool)
}

/// A `:memory:` database exists per connection, so the pool is pinned to a
/// single long-lived connection; every request observes the same dataset.
async fn create_pool() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

fn require_columns(table: &SourceTable, columns: &[&str]) -> Result<(), Error> {
    for column in columns {
        if !table.has_column(column) {
            return Err(Error::MissingJoinColumn {
                table: table.name.clone(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Create a staging table with inferred column affinities and insert every
/// record.
async fn stage(pool: &SqlitePool, table: &SourceTable) -> Result<(), Error> {
    let columns_ddl = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            format!(
                "{} {}",
                quote_identifier(column),
                infer_affinity(table, index)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    sqlx::query(&format!(
        "CREATE TABLE {} ({columns_ddl})",
        quote_identifier(&table.name)
    ))
    .execute(pool)
    .await?;

    let insert_sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(&table.name),
        table
            .columns
            .iter()
            .map(|column| quote_identifier(column))
            .collect::<Vec<_>>()
            .join(", "),
        vec!["?"; table.columns.len()].join(", ")
    );

    let mut transaction = pool.begin().await?;
    for row in &table.rows {
        let mut insert = sqlx::query(&insert_sql);
        for cell in row {
            insert = insert.bind(cell.as_deref());
        }
        insert.execute(&mut *transaction).await?;
    }
    transaction.commit().await?;

    Ok(())
}

/// Merge the staged tables: mileage LEFT JOIN crew on the crew identifier,
/// then LEFT JOIN slot on the slot identifiers. For columns present in more
/// than one source the leftmost copy wins, so `HQ_CODE_C` always comes from
/// the mileage sheets.
async fn merge(
    pool: &SqlitePool,
    mileage: &SourceTable,
    crew: &SourceTable,
    slot: &SourceTable,
) -> Result<(), Error> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected: Vec<String> = Vec::new();

    for (alias, table) in [("m", mileage), ("c", crew), ("s", slot)] {
        for column in &table.columns {
            if seen.insert(column.as_str()) {
                selected.push(format!("{alias}.{}", quote_identifier(column)));
            }
        }
    }

    let create_sql = format!(
        "CREATE TABLE {dataset} AS SELECT {columns} \
         FROM {mileage} AS m \
         LEFT JOIN {crew} AS c ON m.{crew_key} = c.{crew_key} \
         LEFT JOIN {slot} AS s ON m.{slot_key} = s.{slot_key} AND m.{hq_key} = s.{hq_key}",
        dataset = DATASET_TABLE,
        columns = selected.join(", "),
        mileage = quote_identifier(&mileage.name),
        crew = quote_identifier(&crew.name),
        slot = quote_identifier(&slot.name),
        crew_key = quote_identifier(CREW_JOIN_KEY),
        slot_key = quote_identifier(SLOT_JOIN_KEYS[0]),
        hq_key = quote_identifier(SLOT_JOIN_KEYS[1]),
    );

    sqlx::query(&create_sql).execute(pool).await?;
    Ok(())
}

/// SQLite affinity for one column, by scanning its values: INTEGER when every
/// non-empty cell parses as an integer, REAL when every non-empty cell parses
/// as a number, TEXT otherwise (including all-empty columns).
fn infer_affinity(table: &SourceTable, index: usize) -> &'static str {
    let mut any = false;
    let mut integer = true;
    let mut real = true;

    for row in &table.rows {
        let Some(Some(cell)) = row.get(index) else {
            continue;
        };
        any = true;
        if cell.parse::<i64>().is_err() {
            integer = false;
        }
        if cell.parse::<f64>().is_err() {
            real = false;
        }
        if !integer && !real {
            break;
        }
    }

    match (any, integer, real) {
        (true, true, _) => "INTEGER",
        (true, false, true) => "REAL",
        _ => "TEXT",
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
