//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `hbnb.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage backend settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which storage backend serves the records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// `SQLite` database through sqlx.
    Db,
    /// JSON object file.
    #[default]
    File,
}

impl StorageKind {
    /// `db` selects the database, any other value the file store.
    fn from_env_value(value: &str) -> Self {
        if value == "db" { Self::Db } else { Self::File }
    }
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Active backend.
    pub kind: StorageKind,
    /// `SQLite` connection URL, used by [`StorageKind::Db`].
    pub database_url: String,
    /// Object file path, used by [`StorageKind::File`].
    pub file_path: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `hbnb.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hbnb.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
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

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HBNB_API_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("HBNB_API_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("HBNB_TYPE_STORAGE") {
            self.storage.kind = StorageKind::from_env_value(&val);
        }
        if let Some(val) = var("HBNB_DATABASE_URL") {
            self.storage.database_url = val;
        }
        if let Some(val) = var("HBNB_FILE_PATH") {
            self.storage.file_path = val;
        }
        if let Some(val) = var("HBNB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            database_url: "sqlite:hbnb.db?mode=rwc".to_string(),
            file_path: "file.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hbnbd=info,hbnb=info,tower_http=debug".to_string(),
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
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.kind, StorageKind::File);
        assert_eq!(config.storage.database_url, "sqlite:hbnb.db?mode=rwc");
        assert_eq!(config.storage.file_path, "file.json");
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [storage]
            kind = 'db'
            database_url = 'sqlite::memory:'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.kind, StorageKind::Db);
        assert_eq!(config.storage.database_url, "sqlite::memory:");
        assert_eq!(config.storage.file_path, "file.json");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("HBNB_API_HOST", "127.0.0.1"),
            ("HBNB_API_PORT", "8080"),
            ("HBNB_TYPE_STORAGE", "db"),
            ("HBNB_DATABASE_URL", "sqlite:other.db"),
            ("HBNB_LOG", "warn"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.storage.kind, StorageKind::Db);
        assert_eq!(config.storage.database_url, "sqlite:other.db");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_select_file_store_when_storage_type_not_db() {
        let mut config = Config::default();
        config.storage.kind = StorageKind::Db;
        config.apply_overrides(env(&[("HBNB_TYPE_STORAGE", "fs")]));
        assert_eq!(config.storage.kind, StorageKind::File);
    }

    #[test]
    fn should_ignore_unparseable_port() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("HBNB_API_PORT", "http")]));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_prefer_rust_log_over_hbnb_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("HBNB_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_malformed_toml() {
        let result: Result<Config, _> = toml::from_str("[server\nport = 1");
        assert!(result.is_err());
    }
}
