use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use university_records::api::create_router_with_state;
use university_records::config::SecurityConfig;
use university_records::create_app_state_with_factory;
use university_records::infrastructure::storage::StorageFactory;

fn app_with_cost(password_hash_cost: u32) -> Router {
    let state = create_app_state_with_factory(
        &StorageFactory::in_memory(),
        &SecurityConfig { password_hash_cost },
    );
    create_router_with_state(state)
}

fn app() -> Router {
    app_with_cost(1)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

fn student(id: &str) -> Value {
    json!({
        "user": {
            "id": id,
            "role": "student",
            "password": "secret",
            "needsPasswordChange": true
        }
    })
}

fn semester() -> Value {
    json!({
        "title": "Autumn",
        "year": "2025",
        "code": "01",
        "startMonth": "January",
        "endMonth": "May"
    })
}

#[tokio::test]
async fn test_root_is_alive() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], b"Working Successfully");
}

#[tokio::test]
async fn test_create_user_returns_envelope_with_hashed_password() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/v1/users/", Some(student("U1"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["id"], "U1");
    assert_eq!(body["data"]["role"], "student");
    assert_eq!(body["data"]["needsPasswordChange"], true);
    assert!(body["data"]["_id"].is_string());
    assert!(body["data"].get("passwordChangedAt").is_none());

    let password = body["data"]["password"].as_str().unwrap();
    assert_ne!(password, "secret");
    assert!(password.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_create_user_without_trailing_slash() {
    let (status, _) = send(&app(), "POST", "/api/v1/users", Some(student("U1"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_password_changed_at_set_when_change_not_required() {
    let body = json!({
        "user": {
            "id": "F1",
            "role": "faculty",
            "password": "secret",
            "needsPasswordChange": false
        }
    });

    let (status, body) = send(&app(), "POST", "/api/v1/users/", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["needsPasswordChange"], false);
    assert!(body["data"]["passwordChangedAt"].is_string());
}

#[tokio::test]
async fn test_duplicate_user_conflicts() {
    let app = app();

    let (first, _) = send(&app, "POST", "/api/v1/users/", Some(student("U1"))).await;
    let (second, body) = send(&app, "POST", "/api/v1/users/", Some(student("U1"))).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 409);
    assert!(body["message"].as_str().unwrap().contains("U1"));
}

#[tokio::test]
async fn test_profile_reference_stored_as_object_id() {
    let body = json!({
        "user": {
            "id": "S1",
            "role": "student",
            "password": "secret",
            "student": "6f1c2d4e-8a7b-4c3d-9e0f-1a2b3c4d5e6f"
        }
    });

    let (status, body) = send(&app(), "POST", "/api/v1/users/", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student"], "6f1c2d4e8a7b4c3d9e0f1a2b3c4d5e6f");
}

#[tokio::test]
async fn test_mismatched_profile_reference_rejected() {
    let body = json!({
        "user": {
            "id": "U2",
            "role": "student",
            "password": "secret",
            "faculty": "6f1c2d4e-8a7b-4c3d-9e0f-1a2b3c4d5e6f"
        }
    });

    let (status, body) = send(&app(), "POST", "/api/v1/users/", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["errorMessages"].is_array());
}

#[tokio::test]
async fn test_zero_hash_cost_fails_without_persisting() {
    let app = app_with_cost(0);

    let (status, body) = send(&app, "POST", "/api/v1/users/", Some(student("U1"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/api/v1/users/U1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_user_omits_password() {
    let app = app();
    send(&app, "POST", "/api/v1/users/", Some(student("U1"))).await;

    let (status, body) = send(&app, "GET", "/api/v1/users/U1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "U1");
    assert_eq!(body["data"]["role"], "student");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_get_unknown_user_not_found() {
    let (status, body) = send(&app(), "GET", "/api/v1/users/nobody", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
}

#[tokio::test]
async fn test_malformed_user_body_rejected() {
    let body = json!({"user": {"id": "U1", "role": "student"}});

    let (status, body) = send(&app(), "POST", "/api/v1/users/", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["errorMessages"][0]["path"], "body");
}

#[tokio::test]
async fn test_create_semester_echoes_fields() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/v1/academic-semesters/",
        Some(semester()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Academic semester created successfully");

    let data = &body["data"];
    assert!(data["_id"].is_string());
    for (field, expected) in semester().as_object().unwrap() {
        assert_eq!(&data[field], expected, "field {}", field);
    }
}

#[tokio::test]
async fn test_semester_list_and_get() {
    let app = app();

    let (_, created) = send(&app, "POST", "/api/v1/academic-semesters", Some(semester())).await;
    send(&app, "POST", "/api/v1/academic-semesters", Some(semester())).await;
    send(&app, "POST", "/api/v1/academic-semesters", Some(semester())).await;

    let (status, body) = send(&app, "GET", "/api/v1/academic-semesters?page=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({"page": 1, "limit": 2, "total": 3}));
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let id = created["data"]["_id"].as_str().unwrap();
    let (status, body) = send(&app, "GET", &format!("/api/v1/academic-semesters/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["_id"], id);
}

#[tokio::test]
async fn test_semester_invalid_code_rejected() {
    let mut body = semester();
    body["code"] = json!("04");

    let (status, _) = send(&app(), "POST", "/api/v1/academic-semesters/", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_semester_malformed_id_is_bad_request() {
    let (status, body) = send(&app(), "GET", "/api/v1/academic-semesters/not-an-id", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let (status, body) = send(&app(), "GET", "/api/v1/nothing-here", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "API Not Found");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_ready_reports_healthy() {
    let (status, body) = send(&app(), "GET", "/ready", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"].as_array().unwrap().len(), 2);
}
