//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `buildings.toml` in the working directory (or the file named by
//! `BUILDINGS_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use buildings_app::services::building_service::{DEFAULT_PAGE_SIZE, Paging};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Name-search paging.
    pub paging: PagingConfig,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Paging of name searches.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// When `false`, every match is returned regardless of page index.
    pub enabled: bool,
    /// Buildings per page.
    pub size: u32,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("BUILDINGS_CONFIG").unwrap_or_else(|_| "buildings.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BUILDINGS_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("BUILDINGS_PAGE_SIZE")
            && let Ok(size) = val.parse()
        {
            self.paging.size = size;
        }
        if let Ok(val) = std::env::var("BUILDINGS_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "max_connections must be non-zero".to_string(),
            ));
        }
        if self.paging.enabled && self.paging.size == 0 {
            return Err(ConfigError::Validation(
                "page size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Paging mode handed to the building service.
    #[must_use]
    pub fn paging(&self) -> Paging {
        if self.paging.enabled {
            Paging::Fixed {
                size: self.paging.size,
            }
        } else {
            Paging::Disabled
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:buildings.db?mode=rwc".to_string(),
            max_connections: buildings_adapter_storage_sqlite_sqlx::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "buildingctl=info,buildings=info,sqlx=warn".to_string(),
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.database.url, "sqlite:buildings.db?mode=rwc");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.paging(), Paging::Fixed { size: 20 });
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.paging.enabled);
        assert_eq!(config.paging.size, 20);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [database]
            url = 'sqlite:test.db'
            max_connections = 2

            [logging]
            filter = 'debug'

            [paging]
            enabled = false
            size = 50
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.database_url(), "sqlite:test.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.paging(), Paging::Disabled);
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [paging]
            size = 10
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.paging(), Paging::Fixed { size: 10 });
        assert_eq!(config.database.url, "sqlite:buildings.db?mode=rwc");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.paging.size, 20);
    }

    #[test]
    fn should_reject_zero_page_size_when_paging_enabled() {
        let mut config = Config::default();
        config.paging.size = 0;
        assert!(config.validate().is_err());

        config.paging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_zero_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
