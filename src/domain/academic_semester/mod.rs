//! Academic semester domain

mod entity;
mod repository;

pub use entity::{AcademicSemester, Month, SemesterCode, SemesterTitle};
pub use repository::AcademicSemesterRepository;
