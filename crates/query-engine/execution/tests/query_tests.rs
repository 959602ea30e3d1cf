//! Run finalized menu queries against a seeded in-memory database.

use serde_json::Value;
use similar_asserts::assert_eq;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use query_engine_execution::error::Error;
use query_engine_execution::metrics::Metrics;
use query_engine_execution::query::{execute, execute_raw};
use query_engine_translation::translation::query::translate;
use query_engine_translation::translation::templates::Templates;

async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    sqlx::query(
        "CREATE TABLE full_data (
            CREW_ID_V TEXT,
            DATE_TIME_D TEXT,
            NAME_V TEXT,
            TOTAL_KMS REAL,
            FOOT_PLT_KM REAL
        )",
    )
    .execute(&pool)
    .await
    .expect("create full_data");

    let rows = [
        ("C123", "2024-05-03", "A KUMAR", 120.5, 80.0),
        ("C123", "2024-05-10", "A KUMAR", 100.0, 20.0),
        ("C123", "2024-06-01", "A KUMAR", 50.0, 10.0),
        ("C999", "2024-05-04", "B SINGH", 70.0, 70.0),
    ];
    for (crew, date, name, total, foot) in rows {
        sqlx::query("INSERT INTO full_data VALUES (?, ?, ?, ?, ?)")
            .bind(crew)
            .bind(date)
            .bind(name)
            .bind(total)
            .bind(foot)
            .execute(&pool)
            .await
            .expect("seed row");
    }

    pool
}

fn metrics() -> (Metrics, prometheus::Registry) {
    let mut registry = prometheus::Registry::new();
    let metrics = Metrics::initialize(&mut registry).expect("metrics");
    (metrics, registry)
}

fn counter_value(registry: &prometheus::Registry, name: &str) -> f64 {
    registry
        .gather()
        .iter()
        .find(|family| family.get_name() == name)
        .map_or(0.0, |family| family.get_metric()[0].get_counter().get_value())
}

#[tokio::test]
async fn sums_are_scoped_to_crew_and_month() {
    let pool = seeded_pool().await;
    let (metrics, registry) = metrics();
    let templates = Templates::standard();

    let plan = translate(&templates, "3", "1", "C123", Some("2024-05")).unwrap();
    let rows = execute(&pool, &metrics, &plan).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["TOTAL_KMS"], Value::from(220.5));
    assert_eq!(counter_value(&registry, "crewchat_query_total"), 1.0);
}

#[tokio::test]
async fn empty_month_sums_to_null() {
    let pool = seeded_pool().await;
    let (metrics, _registry) = metrics();
    let templates = Templates::standard();

    let plan = translate(&templates, "3", "1", "C123", Some("2031-01")).unwrap();
    let rows = execute(&pool, &metrics, &plan).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["TOTAL_KMS"], Value::Null);
}

#[tokio::test]
async fn column_order_is_preserved() {
    let pool = seeded_pool().await;
    let (metrics, _registry) = metrics();

    let rows = execute_raw(
        &pool,
        &metrics,
        "SELECT NAME_V, CREW_ID_V, TOTAL_KMS FROM full_data ORDER BY DATE_TIME_D LIMIT 1",
    )
    .await
    .unwrap();

    let columns: Vec<&String> = rows[0].keys().collect();
    assert_eq!(columns, vec!["NAME_V", "CREW_ID_V", "TOTAL_KMS"]);
    assert_eq!(rows[0]["NAME_V"], Value::from("A KUMAR"));
}

#[tokio::test]
async fn execution_failure_carries_database_message() {
    let pool = seeded_pool().await;
    let (metrics, registry) = metrics();

    let err = execute_raw(&pool, &metrics, "SELECT NO_SUCH_COLUMN FROM full_data")
        .await
        .unwrap_err();

    let Error::Query(inner) = err;
    assert!(inner.to_string().contains("NO_SUCH_COLUMN"));
    assert_eq!(counter_value(&registry, "crewchat_query_errors_total"), 1.0);
}
