//! Handlers for the `/projects/{project_id}/prefs` resource.
//!
//! The four payloads (vendor filters, site content, guest policies, event
//! details) are typed in `planhaus_core::prefill`; this endpoint stores
//! whichever subset the client sends and leaves the rest untouched.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use planhaus_core::error::CoreError;
use planhaus_core::types::DbId;
use planhaus_db::models::project_prefs::UpdateProjectPrefs;
use planhaus_db::repositories::ProjectPrefsRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/prefs
// ---------------------------------------------------------------------------

/// Get a project's preferences row.
pub async fn get_prefs(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    let prefs = ProjectPrefsRepo::find_by_project(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ProjectPrefs", project_id)))?;
    Ok(Json(DataResponse { data: prefs }))
}

// ---------------------------------------------------------------------------
// PUT /projects/{project_id}/prefs
// ---------------------------------------------------------------------------

/// Upsert any subset of the preference payloads.
pub async fn update_prefs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(body): Json<UpdateProjectPrefs>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;

    let prefs = ProjectPrefsRepo::upsert(&state.pool, project_id, &body).await?;

    tracing::info!(project_id, user_id = auth.user_id, "Project prefs updated");

    Ok(Json(DataResponse { data: prefs }))
}
