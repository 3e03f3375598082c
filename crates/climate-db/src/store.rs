//! The observation store handle and its per-request sessions.
//!
//! [`ObservationStore`] is created once at startup and shared by every
//! request. Each request opens a [`StoreSession`], runs its queries on it,
//! and drops it. For `SQLite` the session owns a pooled connection, so the
//! connection goes back to the pool on every exit path, early `?` returns
//! included.
//!
//! Both types use enum dispatch instead of trait objects because async
//! methods are not dyn-compatible.

use std::sync::Arc;

use climate_types::{Measurement, Station};
use sqlx::pool::PoolConnection;
use sqlx::Sqlite;

use crate::error::DbError;
use crate::measurement_store::MeasurementStore;
use crate::memory::MemoryStore;
use crate::sqlite::SqliteStore;
use crate::station_store::StationStore;

/// A read-only source of measurements and stations.
#[derive(Debug, Clone)]
pub enum ObservationStore {
    /// `SQLite` database file.
    Sqlite(SqliteStore),
    /// Fixed in-memory rows.
    Memory(Arc<MemoryStore>),
}

impl ObservationStore {
    /// Open a session for one request.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if no pooled connection becomes available.
    pub async fn session(&self) -> Result<StoreSession<'_>, DbError> {
        match self {
            Self::Sqlite(store) => Ok(StoreSession::Sqlite(store.acquire().await?)),
            Self::Memory(store) => Ok(StoreSession::Memory(store)),
        }
    }

    /// Human-readable backend name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Memory(_) => "memory",
        }
    }
}

impl From<SqliteStore> for ObservationStore {
    fn from(store: SqliteStore) -> Self {
        Self::Sqlite(store)
    }
}

impl From<MemoryStore> for ObservationStore {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(Arc::new(store))
    }
}

/// Scoped access to the store for the duration of one request.
pub enum StoreSession<'a> {
    /// A connection checked out of the `SQLite` pool.
    Sqlite(PoolConnection<Sqlite>),
    /// A borrow of the in-memory rows.
    Memory(&'a MemoryStore),
}

impl StoreSession<'_> {
    /// Every measurement row in store order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the underlying query fails.
    pub async fn all_measurements(&mut self) -> Result<Vec<Measurement>, DbError> {
        match self {
            Self::Sqlite(conn) => MeasurementStore::new(conn).all().await,
            Self::Memory(store) => Ok(store.measurements().to_vec()),
        }
    }

    /// Every station row in store order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the underlying query fails.
    pub async fn all_stations(&mut self) -> Result<Vec<Station>, DbError> {
        match self {
            Self::Sqlite(conn) => StationStore::new(conn).all().await,
            Self::Memory(store) => Ok(store.stations().to_vec()),
        }
    }

    /// Measurements dated within `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the underlying query fails.
    pub async fn measurements_between(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<Measurement>, DbError> {
        match self {
            Self::Sqlite(conn) => MeasurementStore::new(conn).between(start, end).await,
            Self::Memory(store) => Ok(store.measurements_between(start, end)),
        }
    }

    /// Measurements dated on or after `start`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the underlying query fails.
    pub async fn measurements_since(&mut self, start: &str) -> Result<Vec<Measurement>, DbError> {
        match self {
            Self::Sqlite(conn) => MeasurementStore::new(conn).since(start).await,
            Self::Memory(store) => Ok(store.measurements_since(start)),
        }
    }

    /// The latest measurement date in canonical form, `None` when empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the underlying query fails.
    pub async fn max_date(&mut self) -> Result<Option<String>, DbError> {
        match self {
            Self::Sqlite(conn) => MeasurementStore::new(conn).max_date().await,
            Self::Memory(store) => Ok(store.max_date()),
        }
    }
}
