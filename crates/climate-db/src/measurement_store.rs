//! Read operations on the `measurement` table.
//!
//! Rows come back in `rowid` order, which is the order they were loaded
//! into the store. Date filters compare the stored text lexically; for the
//! canonical `YYYY-MM-DD` format that is chronological order.

use climate_types::Measurement;
use sqlx::SqliteConnection;

use crate::error::DbError;
use crate::schema::MeasurementRow;

/// Operations on the `measurement` table over a borrowed connection.
pub struct MeasurementStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MeasurementStore<'c> {
    /// Bind to a connection for the duration of a request.
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Every measurement row, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn all(&mut self) -> Result<Vec<Measurement>, DbError> {
        let rows = sqlx::query_as::<_, MeasurementRow>(
            r"SELECT station, date, prcp, tobs
              FROM measurement
              ORDER BY rowid",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        tracing::debug!(count = rows.len(), "Fetched all measurements");
        Ok(rows.into_iter().map(Measurement::from).collect())
    }

    /// Measurements dated within `[start, end]`, both ends inclusive.
    ///
    /// Bounds are not validated. Inverted or malformed bounds simply
    /// match nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn between(&mut self, start: &str, end: &str) -> Result<Vec<Measurement>, DbError> {
        let rows = sqlx::query_as::<_, MeasurementRow>(
            r"SELECT station, date, prcp, tobs
              FROM measurement
              WHERE date >= ?1 AND date <= ?2
              ORDER BY rowid",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&mut *self.conn)
        .await?;

        tracing::debug!(start, end, count = rows.len(), "Fetched measurements in range");
        Ok(rows.into_iter().map(Measurement::from).collect())
    }

    /// Measurements dated on or after `start`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn since(&mut self, start: &str) -> Result<Vec<Measurement>, DbError> {
        let rows = sqlx::query_as::<_, MeasurementRow>(
            r"SELECT station, date, prcp, tobs
              FROM measurement
              WHERE date >= ?1
              ORDER BY rowid",
        )
        .bind(start)
        .fetch_all(&mut *self.conn)
        .await?;

        tracing::debug!(start, count = rows.len(), "Fetched measurements since date");
        Ok(rows.into_iter().map(Measurement::from).collect())
    }

    /// The latest measurement date, normalized to `YYYY-MM-DD`.
    ///
    /// Returns `None` when the table is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn max_date(&mut self) -> Result<Option<String>, DbError> {
        let max = sqlx::query_scalar::<_, Option<String>>(
            r"SELECT MAX(strftime('%Y-%m-%d', date)) FROM measurement",
        )
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::debug!(max_date = ?max, "Fetched latest measurement date");
        Ok(max)
    }
}
