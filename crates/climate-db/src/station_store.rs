//! Read operations on the `station` table.

use climate_types::Station;
use sqlx::SqliteConnection;

use crate::error::DbError;
use crate::schema::StationRow;

/// Operations on the `station` table over a borrowed connection.
pub struct StationStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> StationStore<'c> {
    /// Bind to a connection for the duration of a request.
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Every station row in store order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn all(&mut self) -> Result<Vec<Station>, DbError> {
        let rows = sqlx::query_as::<_, StationRow>(
            r"SELECT station, name
              FROM station
              ORDER BY rowid",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        tracing::debug!(count = rows.len(), "Fetched all stations");
        Ok(rows.into_iter().map(Station::from).collect())
    }
}
