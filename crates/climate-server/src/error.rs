//! Error types for the server binary.
//!
//! [`AppError`] wraps every failure mode during startup and serving so
//! `main` can propagate with `?`.

/// Top-level error for the server binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: climate_core::ConfigError,
    },

    /// The observation store could not be opened or has the wrong shape.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: climate_db::DbError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: climate_api::ServerError,
    },

    /// The logging subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the logging failure.
        message: String,
    },
}
