//! Configuration loading and typed config structures for the Climate API.
//!
//! Configuration lives in `climate-config.yaml`. Every field has a default,
//! so a missing file or an empty document yields a working setup that
//! serves `Resources/hawaii.sqlite` on port 5000.

use std::path::Path;

use chrono::NaiveDate;
use climate_db::SqliteConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value was present but unusable.
    #[error("invalid config value for {key}: {message}")]
    Invalid {
        /// The setting that failed.
        key: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClimateConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Observation store connection.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Recent-observation window for `/api/v1.0/tobs`.
    #[serde(default)]
    pub recent: RecentConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClimateConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// A missing file is not an error: defaults are used. Callers that
    /// want to report it check the path before logging is configured.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` overrides `database.url`
    /// - `CLIMATE_HOST` overrides `server.host`
    /// - `CLIMATE_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if an existing file cannot be read,
    /// [`ConfigError::Yaml`] if its content is not valid YAML, or
    /// [`ConfigError::Invalid`] if an override cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML file without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override settings from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `CLIMATE_PORT` is not a port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override settings from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `CLIMATE_PORT` is not a port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = lookup("CLIMATE_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("CLIMATE_PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::Invalid {
                key: "CLIMATE_PORT",
                message: format!("{val}: {e}"),
            })?;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Observation store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` URL of the dataset.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a request waits for a pooled connection, in milliseconds.
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,

    /// Open the dataset read-only.
    #[serde(default = "default_true")]
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Build the pool configuration for [`climate_db::SqliteStore`].
    pub fn sqlite_config(&self) -> SqliteConfig {
        SqliteConfig::new(&self.url)
            .with_max_connections(self.max_connections)
            .with_acquire_timeout(std::time::Duration::from_millis(self.acquire_timeout_ms))
            .with_read_only(self.read_only)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            read_only: default_true(),
        }
    }
}

/// Recent-observation window settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecentConfig {
    /// Fixed anchor date; the window ends here.
    #[serde(default = "default_anchor_date")]
    pub anchor_date: NaiveDate,

    /// Window length in days, counted back from the anchor.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Use the store's latest measurement date as the anchor instead.
    #[serde(default)]
    pub anchor_from_store: bool,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            anchor_date: default_anchor_date(),
            window_days: default_window_days(),
            anchor_from_store: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    String::from("sqlite://Resources/hawaii.sqlite")
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_acquire_timeout_ms() -> u64 {
    5000
}

const fn default_true() -> bool {
    true
}

/// Latest date in the shipped dataset.
fn default_anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 23).unwrap_or_default()
}

const fn default_window_days() -> u32 {
    365
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ClimateConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite://Resources/hawaii.sqlite");
        assert!(config.database.read_only);
        assert_eq!(config.recent.anchor_date.to_string(), "2017-08-23");
        assert_eq!(config.recent.window_days, 365);
        assert!(!config.recent.anchor_from_store);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_document_is_default() {
        let config = ClimateConfig::parse("").unwrap_or_default();
        assert_eq!(config, ClimateConfig::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080

database:
  url: "sqlite://data/other.sqlite"
  max_connections: 2
  acquire_timeout_ms: 250
  read_only: false

recent:
  anchor_date: "2016-12-31"
  window_days: 30
  anchor_from_store: true

logging:
  level: "debug"
  json: true
"#;
        let config = ClimateConfig::parse(yaml).unwrap_or_default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 2);
        assert!(!config.database.read_only);
        assert_eq!(config.recent.anchor_date.to_string(), "2016-12-31");
        assert_eq!(config.recent.window_days, 30);
        assert!(config.recent.anchor_from_store);
        assert!(config.logging.json);

        let sqlite = config.database.sqlite_config();
        assert_eq!(sqlite.url, "sqlite://data/other.sqlite");
        assert_eq!(sqlite.acquire_timeout.as_millis(), 250);
        assert!(!sqlite.read_only);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = ClimateConfig::parse("server:\n  port: 9000\n").unwrap_or_default();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.recent, RecentConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = ClimateConfig::parse("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn overrides_apply_from_lookup() {
        let vars: BTreeMap<&str, &str> = [
            ("DATABASE_URL", "sqlite://override.sqlite"),
            ("CLIMATE_HOST", "127.0.0.1"),
            ("CLIMATE_PORT", "7000"),
        ]
        .into_iter()
        .collect();

        let mut config = ClimateConfig::default();
        let result = config.apply_overrides(|k| vars.get(k).map(|v| (*v).to_owned()));
        assert!(result.is_ok());
        assert_eq!(config.database.url, "sqlite://override.sqlite");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut config = ClimateConfig::default();
        let result = config.apply_overrides(|k| (k == "CLIMATE_PORT").then(|| String::from("http")));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "CLIMATE_PORT",
                ..
            })
        ));
        assert_eq!(config.server.port, 5000);
    }
}
