//! Storage entity traits and document types

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for storage backends that require string keys
    fn as_str(&self) -> &str;
}

/// Trait for types that can be stored as documents in a collection
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The type of the collection's unique secondary key
    type Key: StorageKey;

    /// Returns the value indexed as unique, or `None` when the collection has no unique index
    fn unique_key(&self) -> Option<&Self::Key>;
}

/// Storage-assigned document identifier, serialized as `_id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Generates a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parses an identifier received from a client
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(value)
            .map(|uuid| Self(uuid.simple().to_string()))
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid object id", value)))
    }

    /// Rebuilds an identifier read back from a storage backend
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for ObjectId {
    fn as_str(&self) -> &str {
        ObjectId::as_str(self)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted entity together with the metadata the store assigns on insert
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<E> {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub entity: E,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<E> Document<E> {
    /// Wraps a new entity with a generated id and the current timestamp
    pub fn new(entity: E) -> Self {
        let now = Utc::now();

        Self {
            id: ObjectId::generate(),
            entity,
            created_at: now,
            updated_at: now,
        }
    }
}
