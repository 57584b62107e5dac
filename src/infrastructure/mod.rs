//! Infrastructure layer - Storage backends, hashing and service implementations

pub mod academic_semester;
pub mod logging;
pub mod storage;
pub mod user;
