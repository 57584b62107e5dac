//! Storage-backed user repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::{Document, Storage};
use crate::domain::user::{User, UserCredentials, UserId, UserRepository, CREDENTIAL_FIELDS};
use crate::domain::DomainError;

/// Storage-backed implementation of UserRepository
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn create(&self, user: User) -> Result<Document<User>, DomainError> {
        let id = user.id().clone();

        self.storage.insert(user).await.map_err(|e| {
            if e.is_conflict() {
                DomainError::conflict(format!("User '{}' already exists", id))
            } else {
                e
            }
        })
    }

    async fn get(&self, id: &UserId) -> Result<Option<Document<User>>, DomainError> {
        self.storage.find_by_key(id).await
    }

    async fn find_credentials(&self, id: &UserId) -> Result<Option<UserCredentials>, DomainError> {
        let Some(projection) = self.storage.find_projection(id, &CREDENTIAL_FIELDS).await? else {
            return Ok(None);
        };

        serde_json::from_value(projection)
            .map(Some)
            .map_err(|e| DomainError::storage(format!("Malformed credentials for '{}': {}", id, e)))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
