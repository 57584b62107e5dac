//! User domain
//!
//! Identity records with a role-linked profile reference, the password hashing
//! seam, and the repository trait.

mod entity;
mod password;
mod repository;
mod validation;

pub use entity::{
    PasswordHash, ProfileRef, RoleProfile, User, UserCredentials, UserId, UserRole,
    CREDENTIAL_FIELDS,
};
pub use password::PasswordHasher;
pub use repository::UserRepository;
pub use validation::{validate_password, validate_user_id, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
