//! Integration tests for the `climate-db` observation store.
//!
//! Each test builds a private in-memory `SQLite` database from the
//! declared schema, so no database file or external service is needed.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing
)]

use climate_db::{DbError, MemoryStore, ObservationStore, SCHEMA_DDL, SqliteConfig, SqliteStore};
use climate_types::{Measurement, Station, StationId};
use sqlx::sqlite::SqlitePoolOptions;

// =============================================================================
// Helpers
// =============================================================================

/// Open a single-connection in-memory database and create the tables.
///
/// The pool keeps its one connection alive for the whole test; an
/// in-memory database disappears with its last connection.
async fn setup_sqlite() -> SqliteStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");
    sqlx::raw_sql(SCHEMA_DDL)
        .execute(&pool)
        .await
        .expect("Failed to create schema");
    SqliteStore::from_pool(pool)
}

async fn insert_measurement(
    store: &SqliteStore,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: Option<f64>,
) {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(store.pool())
        .await
        .expect("Failed to insert measurement");
}

async fn insert_station(store: &SqliteStore, station: &str, name: &str) {
    sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
        .bind(station)
        .bind(name)
        .execute(store.pool())
        .await
        .expect("Failed to insert station");
}

async fn seeded_store() -> ObservationStore {
    let store = setup_sqlite().await;
    insert_station(&store, "USC00519397", "WAIKIKI 717.2, HI US").await;
    insert_station(&store, "USC00513117", "KANEOHE 838.1, HI US").await;
    insert_measurement(&store, "USC00519397", "2017-01-03", Some(0.1), Some(70.0)).await;
    insert_measurement(&store, "USC00519397", "2017-01-01", None, Some(60.0)).await;
    insert_measurement(&store, "USC00513117", "2017-01-02", Some(0.0), None).await;
    insert_measurement(&store, "USC00513117", "2017-08-23", Some(0.45), Some(82.0)).await;
    ObservationStore::from(store)
}

// =============================================================================
// SQLite store
// =============================================================================

#[tokio::test]
async fn all_measurements_in_insertion_order() {
    let store = seeded_store().await;
    let mut session = store.session().await.unwrap();

    let rows = session.all_measurements().await.unwrap();
    let dates: Vec<&str> = rows.iter().map(|m| m.date.as_str()).collect();
    assert_eq!(dates, vec!["2017-01-03", "2017-01-01", "2017-01-02", "2017-08-23"]);
    assert_eq!(rows[1].prcp, None);
    assert_eq!(rows[1].tobs, Some(60.0));
}

#[tokio::test]
async fn all_stations_one_per_row() {
    let store = seeded_store().await;
    let mut session = store.session().await.unwrap();

    let stations = session.all_stations().await.unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].station, StationId::from("USC00519397"));
    assert_eq!(stations[1].name, "KANEOHE 838.1, HI US");
}

#[tokio::test]
async fn between_is_inclusive() {
    let store = seeded_store().await;
    let mut session = store.session().await.unwrap();

    let rows = session
        .measurements_between("2017-01-01", "2017-01-03")
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn between_with_inverted_or_malformed_bounds_is_empty() {
    let store = seeded_store().await;
    let mut session = store.session().await.unwrap();

    let inverted = session
        .measurements_between("2017-01-03", "2017-01-01")
        .await
        .unwrap();
    assert!(inverted.is_empty());

    let malformed = session
        .measurements_between("yesterday", "2017-12-31")
        .await
        .unwrap();
    assert!(malformed.is_empty());
}

#[tokio::test]
async fn since_includes_the_bound() {
    let store = seeded_store().await;
    let mut session = store.session().await.unwrap();

    let rows = session.measurements_since("2017-08-23").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2017-08-23");
}

#[tokio::test]
async fn max_date_is_canonical() {
    let store = seeded_store().await;
    let mut session = store.session().await.unwrap();

    assert_eq!(session.max_date().await.unwrap().as_deref(), Some("2017-08-23"));
}

#[tokio::test]
async fn max_date_of_empty_table_is_none() {
    let store = ObservationStore::from(setup_sqlite().await);
    let mut session = store.session().await.unwrap();

    assert_eq!(session.max_date().await.unwrap(), None);
}

#[tokio::test]
async fn session_returns_connection_to_pool_on_drop() {
    // The pool holds exactly one connection; a second session can only
    // be opened if the first one released it.
    let store = seeded_store().await;
    {
        let mut session = store.session().await.unwrap();
        session.all_stations().await.unwrap();
    }
    let mut again = store.session().await.unwrap();
    assert_eq!(again.all_stations().await.unwrap().len(), 2);
}

#[tokio::test]
async fn check_schema_accepts_declared_tables() {
    let store = setup_sqlite().await;
    store.check_schema().await.unwrap();
}

#[tokio::test]
async fn check_schema_rejects_missing_table() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteStore::from_pool(pool);

    let err = store.check_schema().await.unwrap_err();
    assert!(matches!(err, DbError::Schema { table: "measurement", .. }));
}

#[tokio::test]
async fn connect_fails_for_missing_file() {
    // Read-only mode never creates the file.
    let config = SqliteConfig::new("sqlite://does/not/exist/hawaii.sqlite");
    let err = SqliteStore::connect(&config).await.unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

// =============================================================================
// Memory store parity
// =============================================================================

#[tokio::test]
async fn memory_store_matches_sqlite_semantics() {
    let memory = ObservationStore::from(MemoryStore::new(
        vec![
            Measurement {
                station: StationId::from("USC00519397"),
                date: String::from("2017-01-03"),
                prcp: Some(0.1),
                tobs: Some(70.0),
            },
            Measurement {
                station: StationId::from("USC00519397"),
                date: String::from("2017-01-01"),
                prcp: None,
                tobs: Some(60.0),
            },
        ],
        vec![Station {
            station: StationId::from("USC00519397"),
            name: String::from("WAIKIKI 717.2, HI US"),
        }],
    ));
    let sqlite = seeded_store().await;

    let mut m = memory.session().await.unwrap();
    let mut s = sqlite.session().await.unwrap();

    let from_memory = m.measurements_between("2017-01-01", "2017-01-01").await.unwrap();
    let from_sqlite = s.measurements_between("2017-01-01", "2017-01-01").await.unwrap();
    assert_eq!(from_memory, from_sqlite);
    assert_eq!(memory.name(), "memory");
    assert_eq!(sqlite.name(), "sqlite");
}

#[tokio::test]
async fn memory_max_date_matches_sqlite_on_irregular_dates() {
    let dates = ["2017-08-23", "2017-08-24 06:00:00", "unknown", "2017-13-40"];

    let sqlite = setup_sqlite().await;
    for date in dates {
        insert_measurement(&sqlite, "USC00519397", date, None, Some(70.0)).await;
    }
    let sqlite = ObservationStore::from(sqlite);
    let memory = ObservationStore::from(MemoryStore::new(
        dates
            .iter()
            .map(|date| Measurement {
                station: StationId::from("USC00519397"),
                date: (*date).to_owned(),
                prcp: None,
                tobs: Some(70.0),
            })
            .collect(),
        Vec::new(),
    ));

    let from_sqlite = sqlite.session().await.unwrap().max_date().await.unwrap();
    let from_memory = memory.session().await.unwrap().max_date().await.unwrap();
    assert_eq!(from_sqlite.as_deref(), Some("2017-08-24"));
    assert_eq!(from_memory, from_sqlite);
}
