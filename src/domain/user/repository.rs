//! User repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::fmt::Debug;

use super::entity::{User, UserCredentials, UserId};
use crate::domain::storage::Document;
use crate::domain::DomainError;

/// Repository trait for user storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Persist a new user, failing with a conflict if the id is taken
    async fn create(&self, user: User) -> Result<Document<User>, DomainError>;

    /// Get a user by their business id
    async fn get(&self, id: &UserId) -> Result<Option<Document<User>>, DomainError>;

    /// Read only the credential fields of a user
    async fn find_credentials(&self, id: &UserId) -> Result<Option<UserCredentials>, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;
}
