//! User infrastructure
//!
//! Argon2 password hashing, the storage-backed repository and the user service.

pub mod password;
pub mod repository;
pub mod service;

pub use password::{Argon2Hasher, DEFAULT_HASH_COST};
pub use repository::StorageUserRepository;
pub use service::{CreateUserRequest, UserService};
