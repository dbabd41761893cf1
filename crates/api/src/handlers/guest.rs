//! Handlers for the `/projects/{project_id}/guests` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use planhaus_core::error::CoreError;
use planhaus_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use planhaus_core::types::DbId;
use planhaus_db::models::guest::{CreateGuest, UpdateGuest};
use planhaus_db::repositories::GuestRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// Accepted RSVP states.
const RSVP_STATUSES: &[&str] = &["pending", "attending", "declined"];

/// Accepted guest sides.
const SIDES: &[&str] = &["partner_a", "partner_b", "both"];

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Pagination parameters for listing guests.
#[derive(Debug, Deserialize)]
pub struct ListGuestsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_guest_fields(
    first_name: Option<&str>,
    side: Option<&str>,
    rsvp_status: Option<&str>,
) -> AppResult<()> {
    if let Some(name) = first_name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Guest first name cannot be empty".to_string(),
            )));
        }
    }
    if let Some(side) = side {
        if !SIDES.contains(&side) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid side '{side}'. Must be one of: {}",
                SIDES.join(", ")
            ))));
        }
    }
    if let Some(status) = rsvp_status {
        if !RSVP_STATUSES.contains(&status) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid RSVP status '{status}'. Must be one of: {}",
                RSVP_STATUSES.join(", ")
            ))));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/guests
// ---------------------------------------------------------------------------

/// Add a guest to the list.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(body): Json<CreateGuest>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    check_guest_fields(
        Some(body.first_name.as_str()),
        body.side.as_deref(),
        body.rsvp_status.as_deref(),
    )?;

    let guest = GuestRepo::create(&state.pool, project_id, &body).await?;

    tracing::info!(project_id, guest_id = guest.id, user_id = auth.user_id, "Guest created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: guest })))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/guests
// ---------------------------------------------------------------------------

/// List a project's guests alphabetically.
pub async fn list_by_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
    Query(params): Query<ListGuestsParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let items = GuestRepo::list_by_project(&state.pool, project_id, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/guests/{id}
// ---------------------------------------------------------------------------

/// Get a single guest.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let guest = GuestRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Guest", id)))?;
    Ok(Json(DataResponse { data: guest }))
}

// ---------------------------------------------------------------------------
// PATCH /projects/{project_id}/guests/{id}
// ---------------------------------------------------------------------------

/// Partially update a guest.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(body): Json<UpdateGuest>,
) -> AppResult<impl IntoResponse> {
    check_guest_fields(
        body.first_name.as_deref(),
        body.side.as_deref(),
        body.rsvp_status.as_deref(),
    )?;

    let guest = GuestRepo::update(&state.pool, project_id, id, &body)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Guest", id)))?;

    tracing::info!(project_id, guest_id = id, user_id = auth.user_id, "Guest updated");

    Ok(Json(DataResponse { data: guest }))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{project_id}/guests/{id}
// ---------------------------------------------------------------------------

/// Remove a guest. Their seating assignment cascades with them.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = GuestRepo::delete(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Guest", id)));
    }

    tracing::info!(project_id, guest_id = id, user_id = auth.user_id, "Guest deleted");

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted },
    }))
}
