//! University Records API
//!
//! Identity and academic-records backend for a university:
//! - User accounts with hashed passwords and role-linked profiles
//! - Academic semester catalogue
//! - In-memory or PostgreSQL document storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use crate::api::state::AppState;
use crate::config::SecurityConfig;
use crate::domain::academic_semester::AcademicSemester;
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::academic_semester::{
    AcademicSemesterService, StorageAcademicSemesterRepository,
};
use crate::infrastructure::storage::{
    StorageFactory, ACADEMIC_SEMESTERS_COLLECTION, USERS_COLLECTION,
};
use crate::infrastructure::user::{Argon2Hasher, StorageUserRepository, UserService};
use tracing::info;

/// Create the application state with the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let storage_config = config.storage.to_storage_config()?;
    info!("Storage backend: {:?}", storage_config.storage_type());

    let factory = StorageFactory::connect(&storage_config).await?;
    Ok(create_app_state_with_factory(&factory, &config.security))
}

/// Create the application state over an already connected storage factory
pub fn create_app_state_with_factory(
    factory: &StorageFactory,
    security: &SecurityConfig,
) -> AppState {
    let user_repository = Arc::new(StorageUserRepository::new(
        factory.create::<User>(USERS_COLLECTION),
    ));
    let hasher = Arc::new(Argon2Hasher::new(security.password_hash_cost));

    let semester_repository = Arc::new(StorageAcademicSemesterRepository::new(
        factory.create::<AcademicSemester>(ACADEMIC_SEMESTERS_COLLECTION),
    ));

    AppState {
        user_service: Arc::new(UserService::new(user_repository, hasher)),
        academic_semester_service: Arc::new(AcademicSemesterService::new(semester_repository)),
    }
}
