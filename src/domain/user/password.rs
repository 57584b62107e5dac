//! Password hashing seam

use std::fmt::Debug;

use super::entity::PasswordHash;
use crate::domain::DomainError;

/// One-way password hashing with constant-time verification
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a plaintext password with the hasher's configured work factor
    fn hash(&self, password: &str) -> Result<PasswordHash, DomainError>;

    /// Verify a plaintext password against a stored hash.
    /// Returns false for a wrong password and for a malformed hash.
    fn verify(&self, password: &str, hash: &PasswordHash) -> bool;
}
