//! Storage factory for runtime storage selection

use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::migrations::run_storage_migrations;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

#[derive(Debug, Clone)]
enum Backend {
    InMemory,
    Postgres(PgPool),
}

/// Factory for creating document collections over one shared backend
///
/// For PostgreSQL a single pool is opened and the storage migrations are applied
/// before any collection is handed out.
#[derive(Debug, Clone)]
pub struct StorageFactory {
    backend: Backend,
}

impl StorageFactory {
    /// Connects the configured backend
    pub async fn connect(config: &StorageConfig) -> Result<Self, DomainError> {
        let backend = match config {
            StorageConfig::InMemory => Backend::InMemory,
            StorageConfig::Postgres(pg_config) => {
                let pool = pg_config.connect().await?;
                run_storage_migrations(&pool).await?;
                info!("PostgreSQL storage ready");
                Backend::Postgres(pool)
            }
        };

        Ok(Self { backend })
    }

    /// Creates an in-memory factory
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::InMemory,
        }
    }

    /// Returns the storage type backing this factory
    pub fn storage_type(&self) -> StorageType {
        match self.backend {
            Backend::InMemory => StorageType::InMemory,
            Backend::Postgres(_) => StorageType::Postgres,
        }
    }

    /// Creates a storage instance for the named collection
    pub fn create<E>(&self, collection: &str) -> Arc<dyn Storage<E>>
    where
        E: StorageEntity + 'static,
    {
        match &self.backend {
            Backend::InMemory => Arc::new(InMemoryStorage::<E>::new()),
            Backend::Postgres(pool) => Arc::new(PostgresStorage::<E>::new(pool.clone(), collection)),
        }
    }
}
