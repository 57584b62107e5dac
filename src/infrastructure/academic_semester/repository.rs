//! Storage-backed academic semester repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::academic_semester::{AcademicSemester, AcademicSemesterRepository};
use crate::domain::storage::{Document, ObjectId, Storage};
use crate::domain::DomainError;

/// Storage-backed implementation of AcademicSemesterRepository
#[derive(Debug)]
pub struct StorageAcademicSemesterRepository {
    storage: Arc<dyn Storage<AcademicSemester>>,
}

impl StorageAcademicSemesterRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<AcademicSemester>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AcademicSemesterRepository for StorageAcademicSemesterRepository {
    async fn create(
        &self,
        semester: AcademicSemester,
    ) -> Result<Document<AcademicSemester>, DomainError> {
        self.storage.insert(semester).await
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Document<AcademicSemester>>, DomainError> {
        self.storage.get(id).await
    }

    async fn list(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Document<AcademicSemester>>, usize), DomainError> {
        let page = self.storage.list(offset, limit).await?;
        let total = self.storage.count().await?;

        Ok((page, total))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
