//! Success envelope shared by every endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Pagination metadata for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

/// `{ statusCode, success, message, meta?, data }`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// A 200 response carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            success: true,
            message: message.into(),
            meta: None,
            data,
        }
    }

    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::ok("User created successfully", json!({"id": "U1"}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "success": true,
                "message": "User created successfully",
                "data": {"id": "U1"}
            })
        );
    }

    #[test]
    fn test_envelope_with_meta() {
        let response = ApiResponse::ok("ok", Vec::<u8>::new()).with_meta(PageMeta {
            page: 2,
            limit: 5,
            total: 11,
        });
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["meta"], json!({"page": 2, "limit": 5, "total": 11}));
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiResponse::ok("ok", ()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
