//! Request and response types shared by the HTTP endpoints

pub mod error;
pub mod json;
pub mod response;

pub use error::{ApiError, ApiErrorResponse, ErrorMessage};
pub use json::Json;
pub use response::{ApiResponse, PageMeta};
