//! Academic semester repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::AcademicSemester;
use crate::domain::storage::{Document, ObjectId};
use crate::domain::DomainError;

/// Repository trait for academic semester storage
#[async_trait]
pub trait AcademicSemesterRepository: Send + Sync + Debug {
    async fn create(
        &self,
        semester: AcademicSemester,
    ) -> Result<Document<AcademicSemester>, DomainError>;

    async fn get(&self, id: &ObjectId) -> Result<Option<Document<AcademicSemester>>, DomainError>;

    /// List one page of semesters in creation order, with the total count
    async fn list(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Document<AcademicSemester>>, usize), DomainError>;

    /// Count semesters
    async fn count(&self) -> Result<usize, DomainError>;
}
