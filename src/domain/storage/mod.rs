//! Storage domain - Document collection abstraction

mod entity;
mod repository;

pub use entity::{Document, ObjectId, StorageEntity, StorageKey};
pub use repository::{project_fields, Storage};
