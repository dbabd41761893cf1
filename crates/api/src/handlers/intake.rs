//! Handlers for the intake wizard.
//!
//! Step saves take the draft path (structural validation of present values
//! only, partial data persists); submission takes the complete path (all
//! required fields plus consent). Validation problems come back as a 400
//! with the field-path issues list, never as a 500.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use planhaus_core::completion::{intake_completion, is_intake_complete};
use planhaus_core::error::CoreError;
use planhaus_core::intake::steps::IntakeStep;
use planhaus_core::intake::validate::{validate_record, validate_step, ValidationMode};
use planhaus_core::types::DbId;
use planhaus_db::models::intake::{IntakeRow, SaveIntakeStep};
use planhaus_db::repositories::IntakeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Intake record plus the two completion signals the dashboard shows.
#[derive(Debug, Serialize)]
pub struct IntakeStatus {
    #[serde(flatten)]
    pub row: IntakeRow,
    pub completion: u8,
    pub is_complete: bool,
}

fn status_of(row: IntakeRow) -> IntakeStatus {
    let record = row.record();
    IntakeStatus {
        completion: intake_completion(&record),
        is_complete: is_intake_complete(&record),
        row,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_intake_exists(pool: &sqlx::PgPool, project_id: DbId) -> AppResult<IntakeRow> {
    IntakeRepo::find_by_project(pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("IntakeRecord", project_id)))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/intake
// ---------------------------------------------------------------------------

/// Get a project's intake record with completion signals.
pub async fn get_intake(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    let row = ensure_intake_exists(&state.pool, project_id).await?;
    Ok(Json(DataResponse {
        data: status_of(row),
    }))
}

// ---------------------------------------------------------------------------
// PUT /projects/{project_id}/intake/steps/{step}
// ---------------------------------------------------------------------------

/// Save one wizard step (draft semantics, creates the record on first save).
pub async fn save_step(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, step_number)): Path<(DbId, u8)>,
    Json(body): Json<SaveIntakeStep>,
) -> AppResult<impl IntoResponse> {
    let step = IntakeStep::from_number(step_number)?;
    ensure_project_exists(&state.pool, project_id).await?;

    if let Some(existing) = IntakeRepo::find_by_project(&state.pool, project_id).await? {
        if existing.is_submitted {
            return Err(AppError::Core(CoreError::Conflict(
                "Intake has already been submitted".to_string(),
            )));
        }
    }

    let validation = validate_step(step, &body.payload, ValidationMode::Draft);
    if !validation.is_valid {
        return Err(AppError::validation(validation.issues));
    }

    let row = IntakeRepo::save_step(
        &state.pool,
        project_id,
        auth.user_id,
        step.field_name(),
        step_number as i32,
        &body.payload,
    )
    .await?;

    tracing::info!(
        project_id,
        step = step_number,
        user_id = auth.user_id,
        "Intake step saved"
    );

    Ok(Json(DataResponse {
        data: status_of(row),
    }))
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/intake/submit
// ---------------------------------------------------------------------------

/// Submit the intake: complete-mode validation across all steps, then mark
/// the record terminal.
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    let row = ensure_intake_exists(&state.pool, project_id).await?;

    if row.is_submitted {
        return Err(AppError::Core(CoreError::Conflict(
            "Intake has already been submitted".to_string(),
        )));
    }

    let issues = validate_record(&row.record());
    if !issues.is_empty() {
        return Err(AppError::validation(issues));
    }

    let row = IntakeRepo::mark_submitted(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("IntakeRecord", project_id)))?;

    tracing::info!(project_id, user_id = auth.user_id, "Intake submitted");

    Ok(Json(DataResponse {
        data: status_of(row),
    }))
}
