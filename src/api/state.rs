//! Application state for shared services

use std::sync::Arc;

use crate::domain::academic_semester::{AcademicSemester, AcademicSemesterRepository};
use crate::domain::storage::Document;
use crate::domain::user::{PasswordHash, PasswordHasher, User, UserCredentials, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::academic_semester::{
    AcademicSemesterService, Paginated, PaginationOptions,
};
use crate::infrastructure::user::{CreateUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub academic_semester_service: Arc<dyn AcademicSemesterServiceTrait>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<Document<User>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Document<User>>, DomainError>;
    async fn find_credentials(&self, id: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn password_matches(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for academic semester service operations
#[async_trait::async_trait]
pub trait AcademicSemesterServiceTrait: Send + Sync {
    async fn create(
        &self,
        semester: AcademicSemester,
    ) -> Result<Document<AcademicSemester>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Document<AcademicSemester>>, DomainError>;
    async fn list(
        &self,
        options: PaginationOptions,
    ) -> Result<Paginated<Document<AcademicSemester>>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn create(&self, request: CreateUserRequest) -> Result<Document<User>, DomainError> {
        UserService::create(self, request).await
    }

    async fn get(&self, id: &str) -> Result<Option<Document<User>>, DomainError> {
        UserService::get(self, id).await
    }

    async fn find_credentials(&self, id: &str) -> Result<Option<UserCredentials>, DomainError> {
        UserService::find_credentials(self, id).await
    }

    async fn password_matches(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, DomainError> {
        UserService::password_matches(self, candidate, hash).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: AcademicSemesterRepository + 'static> AcademicSemesterServiceTrait
    for AcademicSemesterService<R>
{
    async fn create(
        &self,
        semester: AcademicSemester,
    ) -> Result<Document<AcademicSemester>, DomainError> {
        AcademicSemesterService::create(self, semester).await
    }

    async fn get(&self, id: &str) -> Result<Option<Document<AcademicSemester>>, DomainError> {
        AcademicSemesterService::get(self, id).await
    }

    async fn list(
        &self,
        options: PaginationOptions,
    ) -> Result<Paginated<Document<AcademicSemester>>, DomainError> {
        AcademicSemesterService::list(self, options).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        AcademicSemesterService::count(self).await
    }
}
