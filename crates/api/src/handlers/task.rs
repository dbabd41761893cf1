//! Handlers for the `/projects/{project_id}/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use planhaus_core::error::CoreError;
use planhaus_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use planhaus_core::tasks::{TaskPriority, TaskStatus};
use planhaus_core::types::DbId;
use planhaus_db::models::task::{CreateTask, UpdateTask};
use planhaus_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

/// Pagination parameters for listing tasks.
#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body for bulk task creation.
#[derive(Debug, Deserialize)]
pub struct BulkCreateTasks {
    pub tasks: Vec<CreateTask>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_task_fields(
    title: Option<&str>,
    priority: Option<&str>,
    status: Option<&str>,
) -> AppResult<()> {
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Task title cannot be empty".to_string(),
            )));
        }
    }
    if let Some(priority) = priority {
        TaskPriority::from_str_db(priority)?;
    }
    if let Some(status) = status {
        TaskStatus::from_str_db(status)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/tasks
// ---------------------------------------------------------------------------

/// Create a task.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(body): Json<CreateTask>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    check_task_fields(
        Some(body.title.as_str()),
        body.priority.as_deref(),
        body.status.as_deref(),
    )?;

    let task = TaskRepo::create(&state.pool, project_id, &body).await?;

    tracing::info!(project_id, task_id = task.id, user_id = auth.user_id, "Task created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/tasks/bulk
// ---------------------------------------------------------------------------

/// Create many tasks atomically.
pub async fn create_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(body): Json<BulkCreateTasks>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    if body.tasks.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "tasks list cannot be empty".to_string(),
        )));
    }
    for task in &body.tasks {
        check_task_fields(
            Some(task.title.as_str()),
            task.priority.as_deref(),
            task.status.as_deref(),
        )?;
    }

    let created = TaskRepo::create_bulk(&state.pool, project_id, &body.tasks).await?;

    tracing::info!(
        project_id,
        count = created.len(),
        user_id = auth.user_id,
        "Tasks bulk-created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/tasks
// ---------------------------------------------------------------------------

/// List a project's tasks by due date.
pub async fn list_by_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
    Query(params): Query<ListTasksParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let items = TaskRepo::list_by_project(&state.pool, project_id, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/tasks/{id}
// ---------------------------------------------------------------------------

/// Get a single task.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Task", id)))?;
    Ok(Json(DataResponse { data: task }))
}

// ---------------------------------------------------------------------------
// PATCH /projects/{project_id}/tasks/{id}
// ---------------------------------------------------------------------------

/// Partially update a task.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(body): Json<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    check_task_fields(
        body.title.as_deref(),
        body.priority.as_deref(),
        body.status.as_deref(),
    )?;

    let task = TaskRepo::update(&state.pool, project_id, id, &body)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Task", id)))?;

    tracing::info!(project_id, task_id = id, user_id = auth.user_id, "Task updated");

    Ok(Json(DataResponse { data: task }))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{project_id}/tasks/{id}
// ---------------------------------------------------------------------------

/// Delete a task.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = TaskRepo::delete(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Task", id)));
    }

    tracing::info!(project_id, task_id = id, user_id = auth.user_id, "Task deleted");

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted },
    }))
}
