//! Server binary for the Climate API.
//!
//! Loads configuration, opens the observation store, and serves the HTTP
//! API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `climate-config.yaml` (or the path given)
//! 2. Initialize structured logging (tracing)
//! 3. Open the `SQLite` pool and verify the schema
//! 4. Build shared state with the recent temperature window
//! 5. Serve until shutdown, then close the pool

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use climate_api::{AppState, ServerConfig};
use climate_core::config::LoggingConfig;
use climate_core::{ClimateConfig, RecentWindow};
use climate_db::{ObservationStore, SqliteStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Config file used when neither an argument nor `CLIMATE_CONFIG` names one.
const DEFAULT_CONFIG_PATH: &str = "climate-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the store, or the server fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration.
    let path = config_path(
        std::env::args().skip(1),
        std::env::var("CLIMATE_CONFIG").ok(),
    );
    let (config, found) = load_config(&path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("climate-server starting");
    if !found {
        warn!(path = %path.display(), "Config file not found, using defaults");
    }
    info!(
        path = %path.display(),
        host = %config.server.host,
        port = config.server.port,
        database_url = %config.database.url,
        anchor_date = %config.recent.anchor_date,
        window_days = config.recent.window_days,
        "Configuration loaded"
    );

    // 3. Open the observation store.
    let sqlite = SqliteStore::connect(&config.database.sqlite_config()).await?;
    sqlite.check_schema().await?;

    // 4. Build shared state.
    let window = RecentWindow::from(&config.recent);
    info!(start = %window.start(), "Recent window configured");
    let state = Arc::new(
        AppState::new(ObservationStore::from(sqlite.clone())).with_window(window),
    );

    // 5. Serve until Ctrl-C.
    let server_config = ServerConfig::from(&config.server);
    let result = climate_api::start_server(&server_config, state).await;

    sqlite.close().await;
    info!("climate-server stopped");
    result.map_err(AppError::from)
}

/// Load the config, reporting whether the file existed.
///
/// Runs before the subscriber is installed, so it must not log; `main`
/// reports a missing file once logging is up.
fn load_config(path: &Path) -> Result<(ClimateConfig, bool), AppError> {
    let found = path.exists();
    Ok((ClimateConfig::load(path)?, found))
}

/// Resolve the config path: first CLI argument, then `CLIMATE_CONFIG`,
/// then [`DEFAULT_CONFIG_PATH`].
fn config_path<I>(mut args: I, env: Option<String>) -> PathBuf
where
    I: Iterator<Item = String>,
{
    args.next()
        .or(env)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| AppError::Logging {
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn argument_wins_over_env() {
        let path = config_path(
            vec![String::from("custom.yaml")].into_iter(),
            Some(String::from("env.yaml")),
        );
        assert_eq!(path, PathBuf::from("custom.yaml"));
    }

    #[test]
    fn env_used_without_argument() {
        let path = config_path(std::iter::empty(), Some(String::from("env.yaml")));
        assert_eq!(path, PathBuf::from("env.yaml"));
    }

    #[test]
    fn missing_config_file_is_reported_not_fatal() {
        let (config, found) = load_config(Path::new("does-not-exist/climate-config.yaml")).unwrap();
        assert!(!found);
        assert_eq!(config.recent.window_days, 365);
    }

    #[test]
    fn existing_config_file_is_found() {
        let path = std::env::temp_dir().join("climate-server-config-test.yaml");
        std::fs::write(&path, "recent:\n  window_days: 30\n").unwrap();

        let (config, found) = load_config(&path).unwrap();
        assert!(found);
        assert_eq!(config.recent.window_days, 30);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn default_path_when_nothing_given() {
        let path = config_path(std::iter::empty(), None);
        assert_eq!(path, PathBuf::from(DEFAULT_CONFIG_PATH));
    }
}
