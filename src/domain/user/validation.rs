//! User validation utilities

use thiserror::Error;

use super::entity::UserRole;
use crate::domain::DomainError;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID is required")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("Password is required")]
    EmptyPassword,

    #[error("A '{field}' reference is not allowed for a user with role '{role}'")]
    MismatchedProfile { field: &'static str, role: UserRole },

    #[error("Only one profile reference may be supplied")]
    MultipleProfiles,
}

impl From<UserValidationError> for DomainError {
    fn from(err: UserValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

const MAX_USER_ID_LENGTH: usize = 255;

/// Validate a user ID
///
/// The id is an opaque business key; it only has to be present and fit the unique index.
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.trim().is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    Ok(())
}

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    Ok(())
}
