//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use planhaus_core::error::CoreError;
use planhaus_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use planhaus_core::types::DbId;
use planhaus_db::models::project::{CreateProject, Project, UpdateProject};
use planhaus_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Pagination parameters for listing projects.
#[derive(Debug, Deserialize)]
pub struct ListProjectsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a project exists, returning the full row.
pub async fn ensure_project_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", id)))
}

// ---------------------------------------------------------------------------
// POST /projects
// ---------------------------------------------------------------------------

/// Create a new project owned by the authenticated user.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    if body.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name cannot be empty".to_string(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, auth.user_id, &body).await?;

    tracing::info!(
        project_id = project.id,
        user_id = auth.user_id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

// ---------------------------------------------------------------------------
// GET /projects
// ---------------------------------------------------------------------------

/// List projects, most recent first.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListProjectsParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let items = ProjectRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /projects/{id}
// ---------------------------------------------------------------------------

/// Get a single project by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ensure_project_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// PATCH /projects/{id}
// ---------------------------------------------------------------------------

/// Partially update a project.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Project name cannot be empty".to_string(),
            )));
        }
    }

    let project = ProjectRepo::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", id)))?;

    tracing::info!(project_id = id, user_id = auth.user_id, "Project updated");

    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{id}
// ---------------------------------------------------------------------------

/// Soft-delete a project.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Project", id)));
    }

    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted },
    }))
}
