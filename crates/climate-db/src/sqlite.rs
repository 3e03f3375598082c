//! `SQLite` connection pool and configuration.
//!
//! The climate dataset ships as a single `SQLite` file. Uses [`sqlx`] with
//! runtime query construction (not compile-time checked) so builds never
//! need the database file. All queries are parameterized.

use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

use crate::error::DbError;
use crate::schema::{MEASUREMENT_COLUMNS, MEASUREMENT_TABLE, STATION_COLUMNS, STATION_TABLE};

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default acquire timeout in seconds.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Default idle timeout in seconds.
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Configuration for the `SQLite` connection pool.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// `SQLite` connection URL.
    ///
    /// Format: `sqlite://path/to/file.sqlite`
    pub url: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
    /// Open the database file read-only.
    pub read_only: bool,
}

impl SqliteConfig {
    /// Create a new configuration from a database URL.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            read_only: true,
        }
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the acquire timeout.
    #[must_use]
    pub const fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Open the database read-only (`true`) or read-write (`false`).
    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

/// Connection pool handle to the `SQLite` observation store.
///
/// Cloning is cheap; all clones share one pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the pool using the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    /// Returns [`DbError::Sqlite`] if the database cannot be opened.
    pub async fn connect(config: &SqliteConfig) -> Result<Self, DbError> {
        let connect_options: SqliteConnectOptions = config
            .url
            .parse::<SqliteConnectOptions>()
            .map_err(|e| DbError::Config(format!("Invalid database URL: {e}")))?
            .read_only(config.read_only);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_with(connect_options)
            .await?;

        tracing::info!(
            url = %config.url,
            max_connections = config.max_connections,
            read_only = config.read_only,
            "Opened SQLite observation store"
        );

        Ok(Self { pool })
    }

    /// Open using a database URL string with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened.
    pub async fn connect_url(url: &str) -> Result<Self, DbError> {
        let config = SqliteConfig::new(url);
        Self::connect(&config).await
    }

    /// Wrap an already-built pool.
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Confirm both tables expose the declared columns.
    ///
    /// Runs a zero-row select per table so a wrong file fails at startup
    /// instead of on the first request.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Schema`] naming the first table that does not match.
    pub async fn check_schema(&self) -> Result<(), DbError> {
        for (table, columns) in [
            (MEASUREMENT_TABLE, MEASUREMENT_COLUMNS),
            (STATION_TABLE, STATION_COLUMNS),
        ] {
            sqlx::query(&format!("SELECT {columns} FROM {table} LIMIT 0"))
                .fetch_all(&self.pool)
                .await
                .map_err(|source| DbError::Schema { table, source })?;
        }
        tracing::debug!("Observation store schema verified");
        Ok(())
    }

    /// Take a connection from the pool.
    ///
    /// The connection returns to the pool when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if no connection becomes available
    /// within the acquire timeout.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, DbError> {
        Ok(self.pool.acquire().await?)
    }

    /// Return a reference to the underlying [`SqlitePool`].
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite pool closed");
    }
}
