//! Database migrations infrastructure

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// Collection holding academic semester documents
pub const ACADEMIC_SEMESTERS_COLLECTION: &str = "academic_semesters";

/// Trait for running database migrations
#[async_trait]
pub trait Migrator: Send + Sync {
    /// Runs all pending migrations
    async fn run(&self) -> Result<(), DomainError>;

    /// Reverts the last applied migration
    async fn revert(&self) -> Result<Option<i64>, DomainError>;

    /// Returns the current migration version
    async fn version(&self) -> Result<Option<i64>, DomainError>;
}

/// PostgreSQL migrator tracking applied versions in a `_migrations` table
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
    migrations: Vec<Migration>,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool, migrations: Vec<Migration>) -> Self {
        Self { pool, migrations }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))
    }

    /// Applies a single migration and records it in one transaction
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        for statement in Migration::statements(migration.up) {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::storage(format!(
                        "Failed to run migration {}: {}",
                        migration.version, e
                    ))
                })?;
        }

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit migration: {}", e)))?;

        info!(version = migration.version, description = migration.description, "Applied migration");
        Ok(true)
    }

    /// Reverts a single migration and removes its record in one transaction
    pub async fn revert_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        for statement in Migration::statements(migration.down) {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::storage(format!(
                        "Failed to revert migration {}: {}",
                        migration.version, e
                    ))
                })?;
        }

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to remove migration record {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit revert: {}", e)))?;

        info!(version = migration.version, "Reverted migration");
        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}

#[async_trait]
impl Migrator for PostgresMigrator {
    async fn run(&self) -> Result<(), DomainError> {
        for migration in &self.migrations {
            self.run_migration(migration).await?;
        }

        Ok(())
    }

    async fn revert(&self) -> Result<Option<i64>, DomainError> {
        let Some(version) = self.current_version().await? else {
            return Ok(None);
        };

        let migration = self
            .migrations
            .iter()
            .find(|m| m.version == version)
            .ok_or_else(|| {
                DomainError::storage(format!("Applied migration {} is unknown", version))
            })?;

        self.revert_migration(migration).await?;
        Ok(Some(version))
    }

    async fn version(&self) -> Result<Option<i64>, DomainError> {
        self.current_version().await
    }
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version, applied in ascending order
    pub version: i64,
    /// Human-readable description
    pub description: &'static str,
    /// SQL to run when applying the migration
    pub up: &'static str,
    /// SQL to run when reverting the migration
    pub down: &'static str,
}

impl Migration {
    pub const fn new(
        version: i64,
        description: &'static str,
        up: &'static str,
        down: &'static str,
    ) -> Self {
        Self {
            version,
            description,
            up,
            down,
        }
    }

    /// Splits a migration script into its `;`-terminated statements
    pub fn statements(sql: &'static str) -> Vec<&'static str> {
        sql.split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Migrations creating the document collections
pub fn storage_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create users collection",
            r#"
            CREATE TABLE IF NOT EXISTS users (
                object_id VARCHAR(64) PRIMARY KEY,
                unique_key VARCHAR(255) UNIQUE,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at);
            "#,
            r#"
            DROP TABLE IF EXISTS users;
            "#,
        ),
        Migration::new(
            2,
            "Create academic semesters collection",
            r#"
            CREATE TABLE IF NOT EXISTS academic_semesters (
                object_id VARCHAR(64) PRIMARY KEY,
                unique_key VARCHAR(255) UNIQUE,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_academic_semesters_created_at
                ON academic_semesters(created_at);
            "#,
            r#"
            DROP TABLE IF EXISTS academic_semesters;
            "#,
        ),
    ]
}

/// Runs every storage migration against the given pool
pub async fn run_storage_migrations(pool: &PgPool) -> Result<(), DomainError> {
    let migrator = PostgresMigrator::new(pool.clone(), storage_migrations());
    migrator.run().await
}
