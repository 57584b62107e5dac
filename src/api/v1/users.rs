//! User endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::storage::Document;
use crate::domain::user::{ProfileRef, RoleProfile, User, UserRole};
use crate::infrastructure::user::CreateUserRequest;

/// Body of `POST /api/v1/users`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserBody {
    pub user: UserCreatePayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatePayload {
    pub id: String,
    pub role: UserRole,
    pub password: String,
    #[serde(default = "default_needs_password_change")]
    pub needs_password_change: bool,
    #[serde(default)]
    pub student: Option<ProfileRef>,
    #[serde(default)]
    pub faculty: Option<ProfileRef>,
    #[serde(default)]
    pub admin: Option<ProfileRef>,
}

fn default_needs_password_change() -> bool {
    true
}

impl From<UserCreatePayload> for CreateUserRequest {
    fn from(payload: UserCreatePayload) -> Self {
        Self {
            id: payload.id,
            role: payload.role,
            student: payload.student,
            faculty: payload.faculty,
            admin: payload.admin,
            password: payload.password,
            needs_password_change: payload.needs_password_change,
        }
    }
}

/// User as returned by read endpoints; the password hash is never included
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub object_id: String,
    pub id: String,
    #[serde(flatten)]
    pub profile: RoleProfile,
    pub needs_password_change: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_changed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Document<User>> for UserResponse {
    fn from(document: &Document<User>) -> Self {
        let user = &document.entity;

        Self {
            object_id: document.id.to_string(),
            id: user.id().to_string(),
            profile: user.profile().clone(),
            needs_password_change: user.needs_password_change(),
            password_changed_at: user.password_changed_at().map(|t| t.to_rfc3339()),
            created_at: document.created_at.to_rfc3339(),
            updated_at: document.updated_at.to_rfc3339(),
        }
    }
}

/// POST /api/v1/users
///
/// Responds with the created record as stored, including the password hash.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<ApiResponse<Document<User>>, ApiError> {
    debug!(user_id = %body.user.id, role = %body.user.role, "Creating user");

    let document = state
        .user_service
        .create(body.user.into())
        .await
        .map_err(ApiError::from)?;

    Ok(ApiResponse::ok("User created successfully", document))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let document = state
        .user_service
        .get(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    Ok(ApiResponse::ok(
        "User retrieved successfully",
        UserResponse::from(&document),
    ))
}
