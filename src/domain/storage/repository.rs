//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

use super::entity::{Document, ObjectId, StorageEntity};

/// Collection-style storage for documents of one entity type
///
/// Implementations assign the document id and timestamps on insert and
/// enforce the unique index declared by [`StorageEntity::unique_key`].
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Inserts a new document, returns a conflict if the unique key is taken
    async fn insert(&self, entity: E) -> Result<Document<E>, DomainError>;

    /// Retrieves a document by its storage id
    async fn get(&self, id: &ObjectId) -> Result<Option<Document<E>>, DomainError>;

    /// Retrieves a document through the unique index
    async fn find_by_key(&self, key: &E::Key) -> Result<Option<Document<E>>, DomainError>;

    /// Returns only the named top-level fields of the document with the given unique key.
    /// Fields absent from the document are reported as null.
    async fn find_projection(
        &self,
        key: &E::Key,
        fields: &[&str],
    ) -> Result<Option<Value>, DomainError>;

    /// Retrieves at most `limit` documents in insertion order, skipping the first `offset`
    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<Document<E>>, DomainError>;

    /// Checks if a document with the given unique key exists
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.find_by_key(key).await?.is_some())
    }

    /// Returns the count of documents
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Picks the requested fields out of a serialized entity
pub fn project_fields(value: &Value, fields: &[&str]) -> Value {
    let projected = fields
        .iter()
        .map(|field| {
            let field_value = value.get(*field).cloned().unwrap_or(Value::Null);
            (field.to_string(), field_value)
        })
        .collect();

    Value::Object(projected)
}
