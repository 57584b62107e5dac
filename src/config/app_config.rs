use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};
use crate::infrastructure::user::DEFAULT_HASH_COST;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    /// Falls back to the `DATABASE_URL` environment variable
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 time cost used when hashing new passwords
    pub password_hash_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: DEFAULT_HASH_COST,
        }
    }
}

impl StorageSettings {
    /// Resolves the settings into a storage configuration
    pub fn to_storage_config(&self) -> Result<StorageConfig, DomainError> {
        let storage_type = StorageType::from_str(&self.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown storage backend '{}'", self.backend))
        })?;

        match storage_type {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        DomainError::configuration(
                            "storage.database_url or DATABASE_URL is required for postgres",
                        )
                    })?;

                Ok(StorageConfig::postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(self.max_connections)
                        .with_connect_timeout(self.connect_timeout_secs),
                ))
            }
        }
    }
}

impl AppConfig {
    /// Loads `config/default`, `config/local`, then `APP__*` environment variables.
    /// A value that does not fit its field is an error, never a silent default.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true)
    }

    fn load_from(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }
}
