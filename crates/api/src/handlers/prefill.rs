//! Handlers for intake-to-project prefill.
//!
//! `preview` runs the mappers and returns the derived bundle without
//! writing. `apply` persists the whole bundle in one database transaction,
//! so a failure anywhere leaves the project exactly as it was: there is no
//! partially seeded state to reconcile.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use planhaus_core::completion::{intake_completion, is_intake_complete};
use planhaus_core::error::CoreError;
use planhaus_core::prefill::{self, PrefillBundle};
use planhaus_core::types::DbId;
use planhaus_db::models::intake::IntakeRow;
use planhaus_db::repositories::{IntakeRepo, PrefillApplied, PrefillRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// The mapped bundle plus the completion signals the client gates on.
#[derive(Debug, Serialize)]
pub struct PrefillPreview {
    pub bundle: PrefillBundle,
    pub completion: u8,
    pub is_complete: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_intake(pool: &sqlx::PgPool, project_id: DbId) -> AppResult<IntakeRow> {
    IntakeRepo::find_by_project(pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("IntakeRecord", project_id)))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/prefill
// ---------------------------------------------------------------------------

/// Preview the derived bundle for a project's intake record.
pub async fn preview(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    let row = load_intake(&state.pool, project_id).await?;
    let record = row.record();

    Ok(Json(DataResponse {
        data: PrefillPreview {
            bundle: prefill::build_bundle(&record),
            completion: intake_completion(&record),
            is_complete: is_intake_complete(&record),
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/prefill/apply
// ---------------------------------------------------------------------------

/// Apply the derived bundle to the project in one transaction.
///
/// Budget items and tasks are appended, not reconciled: the client gates
/// repeat application (the preview response carries the signals for that).
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    let row = load_intake(&state.pool, project_id).await?;
    let bundle = prefill::build_bundle(&row.record());

    let applied: PrefillApplied = PrefillRepo::apply_bundle(&state.pool, project_id, &bundle).await?;

    tracing::info!(
        project_id,
        user_id = auth.user_id,
        budget_items = applied.budget_items,
        tasks = applied.tasks,
        prefs_updated = applied.prefs_updated,
        "Prefill applied"
    );

    Ok(Json(DataResponse { data: applied }))
}
