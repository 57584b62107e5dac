//! User service for identity record creation and credential lookup

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::storage::Document;
use crate::domain::user::{
    validate_password, PasswordHash, PasswordHasher, ProfileRef, RoleProfile, User,
    UserCredentials, UserId, UserRepository, UserRole,
};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub id: String,
    pub role: UserRole,
    pub student: Option<ProfileRef>,
    pub faculty: Option<ProfileRef>,
    pub admin: Option<ProfileRef>,
    pub password: String,
    pub needs_password_change: bool,
}

impl CreateUserRequest {
    /// A user without a linked profile who must change the initial password
    pub fn new(id: impl Into<String>, role: UserRole, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            student: None,
            faculty: None,
            admin: None,
            password: password.into(),
            needs_password_change: true,
        }
    }

    pub fn with_needs_password_change(mut self, needs_password_change: bool) -> Self {
        self.needs_password_change = needs_password_change;
        self
    }
}

/// User service owning the password hashing step of user creation
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher + 'static> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create a new user, hashing the plaintext password before it is persisted.
    ///
    /// Uniqueness of the id is left to the storage index, so concurrent creates
    /// with the same id yield exactly one record and one conflict.
    pub async fn create(&self, request: CreateUserRequest) -> Result<Document<User>, DomainError> {
        let user_id = UserId::new(&request.id)?;
        validate_password(&request.password)?;
        let profile =
            RoleProfile::resolve(request.role, request.student, request.faculty, request.admin)?;

        let password = self.hash_password(request.password).await?;
        let user = User::new(user_id, profile, password, request.needs_password_change);

        let document = self.repository.create(user).await.inspect_err(|e| {
            if e.is_conflict() {
                warn!(user_id = %request.id, "User already exists");
            }
        })?;

        info!(
            user_id = %document.entity.id(),
            role = %document.entity.role(),
            "User created"
        );

        Ok(document)
    }

    /// Get a user by business id
    pub async fn get(&self, id: &str) -> Result<Option<Document<User>>, DomainError> {
        let Ok(user_id) = UserId::new(id) else {
            return Ok(None);
        };

        self.repository.get(&user_id).await
    }

    /// Look up the credential fields of a user. Unknown ids yield `None`.
    pub async fn find_credentials(&self, id: &str) -> Result<Option<UserCredentials>, DomainError> {
        let Ok(user_id) = UserId::new(id) else {
            return Ok(None);
        };

        self.repository.find_credentials(&user_id).await
    }

    /// Check a candidate password against a stored hash
    pub async fn password_matches(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, DomainError> {
        let hasher = self.hasher.clone();
        let candidate = candidate.to_string();
        let hash = hash.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&candidate, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    async fn hash_password(&self, password: String) -> Result<PasswordHash, DomainError> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }
}
