//! API configuration

use std::time::Duration;

use serde::Deserialize;

/// Which store implementation backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL through `infra_db`
    Postgres,
    /// Process-local store; data is lost on restart
    Memory,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Store backend
    pub storage: StorageBackend,
    /// Connection pool size
    pub max_connections: u32,
    /// Seconds a request waits for a pooled connection
    pub db_acquire_timeout_secs: u64,
    /// Log level, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Minimum client age in whole years
    pub minimum_age: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/clients".to_string(),
            storage: StorageBackend::Postgres,
            max_connections: 10,
            db_acquire_timeout_secs: 5,
            log_level: "info".to_string(),
            log_json: false,
            minimum_age: domain_client::MINIMUM_AGE,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// `DATABASE_URL` is honoured when `API_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database_url", url)?;
        }
        builder
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for the PostgreSQL backend
    pub fn database(&self) -> infra_db::DatabaseConfig {
        infra_db::DatabaseConfig::new(&self.database_url)
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }

    /// Config for tests: in-memory storage, default age threshold
    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.minimum_age, 18);
        assert!(!config.log_json);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9090)
            .unwrap()
            .set_override("storage", "memory")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.database_url, "postgres://localhost/clients");
    }

    #[test]
    fn test_database_settings_follow_config() {
        let config = ApiConfig {
            database_url: "postgres://db:5432/registry".to_string(),
            max_connections: 4,
            db_acquire_timeout_secs: 12,
            ..ApiConfig::default()
        };

        let database = config.database();
        assert_eq!(database.url, "postgres://db:5432/registry");
        assert_eq!(database.max_connections, 4);
        assert_eq!(database.acquire_timeout, Duration::from_secs(12));
    }
}
