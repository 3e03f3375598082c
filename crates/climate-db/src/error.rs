//! Error types for the observation store.
//!
//! All errors are propagated via [`DbError`], which wraps the underlying
//! [`sqlx`] error with context about which operation failed.

/// Errors that can occur in the observation store.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The physical tables do not match the declared schema.
    #[error("Schema mismatch on table {table}: {source}")]
    Schema {
        /// The table that failed the check.
        table: &'static str,
        /// The underlying query error.
        source: sqlx::Error,
    },
}
