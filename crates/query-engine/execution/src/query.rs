//! Execute a finalized query against the shared dataset.

use indexmap::IndexMap;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

use query_engine_sql::sql::string::SQL;

use crate::error::Error;
use crate::metrics::Metrics;

/// An ordered mapping of column name to value, one per result row.
pub type RowMap = IndexMap<String, Value>;

/// Run a finalized query with its bind parameters and return the matching
/// rows in the database's result order.
pub async fn execute(
    pool: &SqlitePool,
    metrics: &Metrics,
    plan: &SQL,
) -> Result<Vec<RowMap>, Error> {
    let bound: Vec<(&str, &str)> = plan
        .params
        .iter()
        .map(|param| (param.placeholder(), param.value()))
        .collect();
    tracing::debug!(
        generated_sql = %sqlformat::format(
            &plan.sql,
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        ),
        params = ?bound,
    );

    let query = plan
        .params
        .iter()
        .fold(sqlx::query(&plan.sql), |query, param| {
            query.bind(param.value())
        });

    let result = match query.fetch_all(pool).await {
        Ok(rows) => rows_to_maps(&rows),
        Err(err) => Err(Error::Query(err)),
    };
    record(metrics, &result);
    result
}

/// Run a raw SQL string carrying no bind parameters (model-generated SQL).
pub async fn execute_raw(
    pool: &SqlitePool,
    metrics: &Metrics,
    sql: &str,
) -> Result<Vec<RowMap>, Error> {
    tracing::debug!(generated_sql = %sql);

    let result = match sqlx::query(sql).fetch_all(pool).await {
        Ok(rows) => rows_to_maps(&rows),
        Err(err) => Err(Error::Query(err)),
    };
    record(metrics, &result);
    result
}

fn record(metrics: &Metrics, result: &Result<Vec<RowMap>, Error>) {
    match result {
        Ok(_) => metrics.record_successful_query(),
        Err(_) => metrics.record_failed_query(),
    }
}

fn rows_to_maps(rows: &[SqliteRow]) -> Result<Vec<RowMap>, Error> {
    rows.iter().map(row_to_map).collect()
}

/// Decode one row into an ordered column → JSON value mapping, by the value's
/// SQLite storage class.
fn row_to_map(row: &SqliteRow) -> Result<RowMap, Error> {
    let mut map = IndexMap::with_capacity(row.columns().len());
    for column in row.columns() {
        let ordinal = column.ordinal();
        let raw = row.try_get_raw(ordinal)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(ordinal)?),
                "REAL" => Value::from(row.try_get::<f64, _>(ordinal)?),
                "BLOB" => {
                    let bytes = row.try_get::<Vec<u8>, _>(ordinal)?;
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => Value::from(row.try_get::<String, _>(ordinal)?),
            }
        };
        map.insert(column.name().to_string(), value);
    }
    Ok(map)
}
