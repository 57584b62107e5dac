//! JSON body extractor that reports rejections in the API error envelope

use axum::{
    extract::{rejection::JsonRejection as AxumJsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Drop-in replacement for `axum::Json` as a request extractor.
///
/// Malformed bodies and missing fields are reported through [`ApiError`]
/// with `body` as the error path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Body rejection rendered as an [`ApiError`]
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        ApiError::new(self.status, self.message)
            .with_path("body")
            .into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| Json(value))
            .map_err(|rejection| JsonRejection {
                status: rejection.status(),
                message: rejection_message(&rejection),
            })
    }
}

fn rejection_message(rejection: &AxumJsonRejection) -> String {
    match rejection {
        AxumJsonRejection::JsonDataError(err) => format!("Invalid request body: {}", err.body_text()),
        AxumJsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        AxumJsonRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        AxumJsonRejection::BytesRejection(err) => {
            format!("Failed to read request body: {}", err.body_text())
        }
        _ => "Invalid JSON request".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct SemesterYear {
        year: String,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_valid_body() {
        let Json(value) = Json::<SemesterYear>::from_request(json_request(r#"{"year":"2025"}"#), &())
            .await
            .unwrap();

        assert_eq!(value.year, "2025");
    }

    #[tokio::test]
    async fn test_missing_field_rejected_as_envelope() {
        let rejection = Json::<SemesterYear>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        assert_eq!(rejection.status, StatusCode::UNPROCESSABLE_ENTITY);

        let response = rejection.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 422);
        assert_eq!(body["errorMessages"][0]["path"], "body");
        assert!(body["message"].as_str().unwrap().contains("year"));
    }

    #[tokio::test]
    async fn test_syntax_error_rejected() {
        let rejection = Json::<SemesterYear>::from_request(json_request("{"), &())
            .await
            .unwrap_err();

        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert!(rejection.message.starts_with("Invalid JSON syntax"));
    }

    #[tokio::test]
    async fn test_missing_content_type_rejected() {
        let request = axum::http::Request::builder()
            .body(axum::body::Body::from(r#"{"year":"2025"}"#))
            .unwrap();

        let rejection = Json::<SemesterYear>::from_request(request, &())
            .await
            .unwrap_err();

        assert_eq!(rejection.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(rejection.message.contains("Content-Type"));
    }
}
