//! Academic semester infrastructure

pub mod repository;
pub mod service;

pub use repository::StorageAcademicSemesterRepository;
pub use service::{AcademicSemesterService, Paginated, PaginationOptions};
