//! Domain layer - Core business logic and entities

pub mod academic_semester;
pub mod error;
pub mod storage;
pub mod user;

pub use academic_semester::{AcademicSemester, AcademicSemesterRepository};
pub use error::DomainError;
pub use storage::{Document, ObjectId, Storage, StorageEntity, StorageKey};
pub use user::{
    PasswordHash, PasswordHasher, RoleProfile, User, UserCredentials, UserId, UserRepository,
    UserRole,
};
