//! PostgreSQL document storage with connection pooling

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::storage::{Document, ObjectId, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

const DOCUMENT_COLUMNS: &str = "object_id, data, created_at, updated_at";

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/university_records".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Opens a connection pool using this configuration
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// PostgreSQL document collection
///
/// Each collection is a table with `(object_id, unique_key, data, created_at, updated_at)`
/// columns. The entity itself is stored as JSONB in `data`; `unique_key` carries the
/// collection's unique index. Tables are created by the storage migrations.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table_name: String,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new PostgreSQL storage over an existing pool
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn document_from_row(row: &PgRow) -> Result<Document<E>, DomainError> {
        let object_id: String = row
            .try_get("object_id")
            .map_err(|e| DomainError::storage(format!("Failed to read object id: {}", e)))?;
        let data: Value = row
            .try_get("data")
            .map_err(|e| DomainError::storage(format!("Failed to read document data: {}", e)))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| DomainError::storage(format!("Failed to read created_at: {}", e)))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| DomainError::storage(format!("Failed to read updated_at: {}", e)))?;

        let entity: E = serde_json::from_value(data).map_err(|e| {
            DomainError::storage(format!("Failed to deserialize entity: {}", e))
        })?;

        Ok(Document {
            id: ObjectId::from_stored(object_id),
            entity,
            created_at,
            updated_at,
        })
    }
}

/// Builds the `jsonb_build_object` argument list selecting `fields` out of `data`.
/// Field names are bound as parameters starting at `$first_param`.
fn projection_select(fields: &[&str], first_param: usize) -> String {
    fields
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let param = first_param + i;
            format!("${param}::text, data -> ${param}::text")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn insert(&self, entity: E) -> Result<Document<E>, DomainError> {
        let unique_key = entity.unique_key().map(|key| key.as_str().to_string());
        let data = serde_json::to_value(&entity).map_err(|e| {
            DomainError::storage(format!("Failed to serialize entity: {}", e))
        })?;
        let document = Document::new(entity);

        let query = format!(
            r#"
            INSERT INTO {} (object_id, unique_key, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .bind(document.id.as_str())
            .bind(&unique_key)
            .bind(&data)
            .bind(document.created_at)
            .bind(document.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::conflict(format!(
                        "Document with key '{}' already exists",
                        unique_key.as_deref().unwrap_or_default()
                    ))
                }
                other => DomainError::storage(format!("Failed to insert document: {}", other)),
            })?;

        Ok(document)
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Document<E>>, DomainError> {
        let query = format!(
            "SELECT {} FROM {} WHERE object_id = $1",
            DOCUMENT_COLUMNS, self.table_name
        );

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get document: {}", e)))?;

        row.as_ref().map(Self::document_from_row).transpose()
    }

    async fn find_by_key(&self, key: &E::Key) -> Result<Option<Document<E>>, DomainError> {
        let query = format!(
            "SELECT {} FROM {} WHERE unique_key = $1",
            DOCUMENT_COLUMNS, self.table_name
        );

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find document: {}", e)))?;

        row.as_ref().map(Self::document_from_row).transpose()
    }

    async fn find_projection(
        &self,
        key: &E::Key,
        fields: &[&str],
    ) -> Result<Option<Value>, DomainError> {
        let query = format!(
            "SELECT jsonb_build_object({}) AS projection FROM {} WHERE unique_key = $1",
            projection_select(fields, 2),
            self.table_name
        );

        let mut statement = sqlx::query(&query).bind(key.as_str());
        for field in fields {
            statement = statement.bind(*field);
        }

        let row = statement
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to project document: {}", e)))?;

        row.map(|row| {
            row.try_get::<Value, _>("projection")
                .map_err(|e| DomainError::storage(format!("Failed to read projection: {}", e)))
        })
        .transpose()
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<Document<E>>, DomainError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY created_at, object_id LIMIT $1 OFFSET $2",
            DOCUMENT_COLUMNS, self.table_name
        );

        let rows = sqlx::query(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list documents: {}", e)))?;

        rows.iter().map(Self::document_from_row).collect()
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE unique_key = $1) as exists",
            self.table_name
        );

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check existence: {}", e)))?;

        row.try_get("exists")
            .map_err(|e| DomainError::storage(format!("Failed to read existence: {}", e)))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let query = format!("SELECT COUNT(*) as count FROM {}", self.table_name);

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count documents: {}", e)))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::storage(format!("Failed to read count: {}", e)))?;
        Ok(count as usize)
    }
}
