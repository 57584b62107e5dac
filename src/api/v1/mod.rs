//! Version 1 of the HTTP API, mounted under `/api/v1`

pub mod academic_semesters;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the v1 router. Collection routes answer with and without a trailing slash.
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/", post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        .route(
            "/academic-semesters",
            get(academic_semesters::list_semesters).post(academic_semesters::create_semester),
        )
        .route(
            "/academic-semesters/",
            get(academic_semesters::list_semesters).post(academic_semesters::create_semester),
        )
        .route(
            "/academic-semesters/{id}",
            get(academic_semesters::get_semester),
        )
}
