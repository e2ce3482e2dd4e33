//! Application configuration management.

use std::path::Path;

use serde::Deserialize;

/// Database path that selects a private in-memory store.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite file, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub path: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_database_path() -> String {
    "conciliacion.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a throwaway in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY_PATH.to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }

    /// Configuration for a store at the given file path.
    #[must_use]
    pub fn at_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Whether this configuration points at an in-memory store.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    /// Connection URL understood by the SQLite driver.
    ///
    /// File stores are opened in read-write-create mode so the first start
    /// can create the file.
    #[must_use]
    pub fn url(&self) -> String {
        if self.is_in_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}?mode=rwc", self.path)
        }
    }

    /// Whether the store already exists and must be left untouched.
    #[must_use]
    pub fn is_provisioned(&self) -> bool {
        !self.is_in_memory() && Path::new(&self.path).exists()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("CONCILIACION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_any_source() {
        temp_env::with_vars_unset(
            [
                "CONCILIACION__SERVER__PORT",
                "CONCILIACION__DATABASE__PATH",
            ],
            || {
                let config = AppConfig::load().expect("defaults should load");
                assert_eq!(config.server.host, "127.0.0.1");
                assert_eq!(config.server.port, 5000);
                assert_eq!(config.server.static_dir, "static");
                assert_eq!(config.server.max_upload_bytes, 16 * 1024 * 1024);
                assert_eq!(config.database.path, "conciliacion.db");
                assert_eq!(config.database.max_connections, 5);
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("CONCILIACION__SERVER__PORT", Some("8081")),
                ("CONCILIACION__DATABASE__PATH", Some("/var/lib/conciliacion.db")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.port, 8081);
                assert_eq!(config.database.path, "/var/lib/conciliacion.db");
            },
        );
    }

    #[test]
    fn test_database_url() {
        assert_eq!(DatabaseConfig::in_memory().url(), "sqlite::memory:");
        assert_eq!(
            DatabaseConfig::at_path("data/conciliacion.db").url(),
            "sqlite://data/conciliacion.db?mode=rwc"
        );
    }

    #[test]
    fn test_in_memory_is_never_provisioned() {
        let config = DatabaseConfig::in_memory();
        assert!(config.is_in_memory());
        assert!(!config.is_provisioned());
    }

    #[test]
    fn test_missing_file_is_not_provisioned() {
        let config = DatabaseConfig::at_path("does/not/exist/conciliacion.db");
        assert!(!config.is_provisioned());
    }
}
