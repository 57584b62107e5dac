//! Academic semester endpoints

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json, PageMeta};
use crate::domain::academic_semester::AcademicSemester;
use crate::domain::storage::Document;
use crate::infrastructure::academic_semester::PaginationOptions;

/// Query parameters of the list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSemestersQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// POST /api/v1/academic-semesters
pub async fn create_semester(
    State(state): State<AppState>,
    Json(semester): Json<AcademicSemester>,
) -> Result<ApiResponse<Document<AcademicSemester>>, ApiError> {
    debug!(year = %semester.year, title = ?semester.title, "Creating academic semester");

    let document = state
        .academic_semester_service
        .create(semester)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiResponse::ok("Academic semester created successfully", document))
}

/// GET /api/v1/academic-semesters
pub async fn list_semesters(
    State(state): State<AppState>,
    Query(query): Query<ListSemestersQuery>,
) -> Result<ApiResponse<Vec<Document<AcademicSemester>>>, ApiError> {
    let options = PaginationOptions::new(query.page, query.limit);
    debug!(page = options.page, limit = options.limit, "Listing academic semesters");

    let page = state
        .academic_semester_service
        .list(options)
        .await
        .map_err(ApiError::from)?;

    let meta = PageMeta {
        page: page.page,
        limit: page.limit,
        total: page.total,
    };

    Ok(ApiResponse::ok("Academic semesters retrieved successfully", page.items).with_meta(meta))
}

/// GET /api/v1/academic-semesters/{id}
pub async fn get_semester(
    State(state): State<AppState>,
    Path(semester_id): Path<String>,
) -> Result<ApiResponse<Document<AcademicSemester>>, ApiError> {
    debug!(semester_id = %semester_id, "Getting academic semester");

    let document = state
        .academic_semester_service
        .get(&semester_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            ApiError::not_found(format!("Academic semester '{}' not found", semester_id))
        })?;

    Ok(ApiResponse::ok("Academic semester retrieved successfully", document))
}
