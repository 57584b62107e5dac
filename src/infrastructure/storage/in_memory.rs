//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::storage::{
    project_fields, Document, ObjectId, Storage, StorageEntity, StorageKey,
};
use crate::domain::DomainError;

#[derive(Debug)]
struct Collection<E> {
    documents: HashMap<String, Document<E>>,
    unique_index: HashMap<String, String>,
    insertion_order: Vec<String>,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self {
            documents: HashMap::new(),
            unique_index: HashMap::new(),
            insertion_order: Vec::new(),
        }
    }
}

/// Thread-safe in-memory document collection
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    collection: RwLock<Collection<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(Collection::default()),
        }
    }

    fn find_by_key_locked<'a>(
        collection: &'a Collection<E>,
        key: &E::Key,
    ) -> Option<&'a Document<E>> {
        collection
            .unique_index
            .get(key.as_str())
            .and_then(|object_id| collection.documents.get(object_id))
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn insert(&self, entity: E) -> Result<Document<E>, DomainError> {
        let unique_key = entity.unique_key().map(|key| key.as_str().to_string());
        let mut collection = self.collection.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(key) = &unique_key {
            if collection.unique_index.contains_key(key) {
                return Err(DomainError::conflict(format!(
                    "Document with key '{}' already exists",
                    key
                )));
            }
        }

        let document = Document::new(entity);
        let object_id = document.id.as_str().to_string();

        if let Some(key) = unique_key {
            collection.unique_index.insert(key, object_id.clone());
        }
        collection.insertion_order.push(object_id.clone());
        collection.documents.insert(object_id, document.clone());

        Ok(document)
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Document<E>>, DomainError> {
        let collection = self.collection.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(collection.documents.get(id.as_str()).cloned())
    }

    async fn find_by_key(&self, key: &E::Key) -> Result<Option<Document<E>>, DomainError> {
        let collection = self.collection.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(Self::find_by_key_locked(&collection, key).cloned())
    }

    async fn find_projection(
        &self,
        key: &E::Key,
        fields: &[&str],
    ) -> Result<Option<Value>, DomainError> {
        let collection = self.collection.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let Some(document) = Self::find_by_key_locked(&collection, key) else {
            return Ok(None);
        };

        let value = serde_json::to_value(&document.entity).map_err(|e| {
            DomainError::storage(format!("Failed to serialize entity: {}", e))
        })?;

        Ok(Some(project_fields(&value, fields)))
    }

    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<Document<E>>, DomainError> {
        let collection = self.collection.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(collection
            .insertion_order
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|object_id| collection.documents.get(object_id).cloned())
            .collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let collection = self.collection.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(collection.documents.len())
    }
}
