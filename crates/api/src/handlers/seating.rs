//! Handlers for the seating chart: tables and guest assignments.
//!
//! Assignment moves are replace-not-merge, and the capacity / numbered-seat
//! invariants are enforced inside the repository transaction. Conflicts
//! come back as 409s.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use planhaus_core::error::CoreError;
use planhaus_core::seating::validate_max_seats;
use planhaus_core::types::DbId;
use planhaus_db::models::seating::{AssignGuest, CreateSeatingTable, UpdateSeatingTable};
use planhaus_db::repositories::{SeatingAssignmentRepo, SeatingTableRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/seating/tables
// ---------------------------------------------------------------------------

/// Add a table to the floor plan.
pub async fn create_table(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(body): Json<CreateSeatingTable>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    if body.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Table name cannot be empty".to_string(),
        )));
    }
    if let Some(max_seats) = body.max_seats {
        validate_max_seats(max_seats)?;
    }

    let table = SeatingTableRepo::create(&state.pool, project_id, &body).await?;

    tracing::info!(
        project_id,
        table_id = table.id,
        max_seats = table.max_seats,
        user_id = auth.user_id,
        "Seating table created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: table })))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/seating/tables
// ---------------------------------------------------------------------------

/// List a project's tables.
pub async fn list_tables(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tables = SeatingTableRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: tables }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/seating/tables/{id}
// ---------------------------------------------------------------------------

/// Get a single table.
pub async fn get_table(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let table = SeatingTableRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SeatingTable", id)))?;
    Ok(Json(DataResponse { data: table }))
}

// ---------------------------------------------------------------------------
// PATCH /projects/{project_id}/seating/tables/{id}
// ---------------------------------------------------------------------------

/// Partially update a table.
///
/// Shrinking `max_seats` below the current occupancy is rejected; seated
/// guests never silently lose their chairs.
pub async fn update_table(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(body): Json<UpdateSeatingTable>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Table name cannot be empty".to_string(),
            )));
        }
    }
    if let Some(max_seats) = body.max_seats {
        validate_max_seats(max_seats)?;
        let occupancy = SeatingAssignmentRepo::count_by_table(&state.pool, id).await?;
        if occupancy > max_seats as i64 {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Cannot shrink table below its {occupancy} seated guests"
            ))));
        }
    }

    let table = SeatingTableRepo::update(&state.pool, project_id, id, &body)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SeatingTable", id)))?;

    tracing::info!(project_id, table_id = id, user_id = auth.user_id, "Seating table updated");

    Ok(Json(DataResponse { data: table }))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{project_id}/seating/tables/{id}
// ---------------------------------------------------------------------------

/// Delete a table. Its assignments cascade with the row.
pub async fn delete_table(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = SeatingTableRepo::delete(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("SeatingTable", id)));
    }

    tracing::info!(project_id, table_id = id, user_id = auth.user_id, "Seating table deleted");

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted },
    }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/seating/assignments
// ---------------------------------------------------------------------------

/// List a project's assignments, grouped by table.
pub async fn list_assignments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignments = SeatingAssignmentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/seating/assignments
// ---------------------------------------------------------------------------

/// Assign a guest to a table, replacing any previous assignment.
pub async fn assign_guest(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(body): Json<AssignGuest>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;

    let assignment = SeatingAssignmentRepo::assign(&state.pool, project_id, &body).await?;

    tracing::info!(
        project_id,
        guest_id = body.guest_id,
        table_id = body.table_id,
        seat_number = body.seat_number,
        user_id = auth.user_id,
        "Guest assigned to table"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{project_id}/seating/assignments/guest/{guest_id}
// ---------------------------------------------------------------------------

/// Remove a guest from their table.
pub async fn remove_guest(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, guest_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed = SeatingAssignmentRepo::remove_by_guest(&state.pool, project_id, guest_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::not_found(
            "SeatingAssignment",
            guest_id,
        )));
    }

    tracing::info!(project_id, guest_id, user_id = auth.user_id, "Guest unassigned");

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted: removed },
    }))
}
