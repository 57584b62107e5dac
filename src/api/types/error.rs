//! Error envelope returned by every failing endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

/// One entry of `errorMessages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub path: String,
    pub message: String,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub status_code: u16,
    pub success: bool,
    pub message: String,
    pub error_messages: Vec<ErrorMessage>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error with a single, path-less error message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();

        Self {
            status,
            response: ApiErrorResponse {
                status_code: status.as_u16(),
                success: false,
                error_messages: vec![ErrorMessage {
                    path: String::new(),
                    message: message.clone(),
                }],
                message,
            },
        }
    }

    /// Attribute the error to a request field
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();

        for entry in &mut self.response.error_messages {
            entry.path = path.clone();
        }
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.response.message, "Request failed");
        }

        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::InvalidId { message } => Self::bad_request(message).with_path("id"),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Configuration { message } => Self::internal(message),
            DomainError::Internal { message } => Self::internal(message),
            DomainError::Storage { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.response.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Password is required");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.status_code, 400);
        assert!(!err.response.success);
        assert_eq!(err.response.message, "Password is required");
        assert_eq!(
            err.response.error_messages,
            vec![ErrorMessage {
                path: String::new(),
                message: "Password is required".to_string()
            }]
        );
    }

    #[test]
    fn test_api_error_with_path() {
        let err = ApiError::bad_request("Invalid value").with_path("user.id");
        assert_eq!(err.response.error_messages[0].path, "user.id");
    }

    #[test]
    fn test_domain_error_conversion() {
        let cases = [
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("x"), StatusCode::CONFLICT),
            (DomainError::configuration("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::storage("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, expected) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, expected);
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::conflict("User 'U1' already exists");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["statusCode"], 409);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User 'U1' already exists");
        assert_eq!(json["errorMessages"][0]["message"], "User 'U1' already exists");
    }
}
