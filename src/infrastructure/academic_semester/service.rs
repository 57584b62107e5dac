//! Academic semester service

use std::sync::Arc;

use tracing::info;

use crate::domain::academic_semester::{AcademicSemester, AcademicSemesterRepository};
use crate::domain::storage::{Document, ObjectId};
use crate::domain::DomainError;

const DEFAULT_PAGE_LIMIT: usize = 10;
const MAX_PAGE_LIMIT: usize = 100;

/// Page request, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    pub page: usize,
    pub limit: usize,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PaginationOptions {
    /// Builds options from optional query values, clamping them into range
    pub fn new(page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

/// Academic semester service
#[derive(Debug)]
pub struct AcademicSemesterService<R: AcademicSemesterRepository> {
    repository: Arc<R>,
}

impl<R: AcademicSemesterRepository> AcademicSemesterService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Persist a semester exactly as submitted
    pub async fn create(
        &self,
        semester: AcademicSemester,
    ) -> Result<Document<AcademicSemester>, DomainError> {
        let document = self.repository.create(semester).await?;

        info!(semester_id = %document.id, year = %document.entity.year, "Academic semester created");
        Ok(document)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Document<AcademicSemester>>, DomainError> {
        let object_id = ObjectId::parse(id)?;
        self.repository.get(&object_id).await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    pub async fn list(
        &self,
        options: PaginationOptions,
    ) -> Result<Paginated<Document<AcademicSemester>>, DomainError> {
        let (items, total) = self.repository.list(options.offset(), options.limit).await?;

        Ok(Paginated {
            items,
            page: options.page,
            limit: options.limit,
            total,
        })
    }
}
