//! Handlers for the `/projects/{project_id}/budget-items` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use planhaus_core::budget::BudgetCategory;
use planhaus_core::error::CoreError;
use planhaus_core::types::DbId;
use planhaus_db::models::budget_item::{CreateBudgetItem, UpdateBudgetItem};
use planhaus_db::repositories::BudgetItemRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_budget_fields(category: Option<&str>, percent: Option<f64>) -> AppResult<()> {
    if let Some(category) = category {
        BudgetCategory::from_str_db(category)?;
    }
    if let Some(percent) = percent {
        if !(0.0..=100.0).contains(&percent) {
            return Err(AppError::Core(CoreError::Validation(
                "Percent must be between 0 and 100".to_string(),
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/budget-items
// ---------------------------------------------------------------------------

/// Add a budget line.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(body): Json<CreateBudgetItem>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    check_budget_fields(Some(body.category.as_str()), body.percent)?;

    let item = BudgetItemRepo::create(&state.pool, project_id, &body).await?;

    tracing::info!(
        project_id,
        budget_item_id = item.id,
        category = %item.category,
        user_id = auth.user_id,
        "Budget item created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/budget-items
// ---------------------------------------------------------------------------

/// List a project's budget lines.
pub async fn list_by_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let items = BudgetItemRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/budget-items/{id}
// ---------------------------------------------------------------------------

/// Get a single budget line.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let item = BudgetItemRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BudgetItem", id)))?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// PATCH /projects/{project_id}/budget-items/{id}
// ---------------------------------------------------------------------------

/// Partially update a budget line.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(body): Json<UpdateBudgetItem>,
) -> AppResult<impl IntoResponse> {
    check_budget_fields(body.category.as_deref(), body.percent)?;

    let item = BudgetItemRepo::update(&state.pool, project_id, id, &body)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("BudgetItem", id)))?;

    tracing::info!(project_id, budget_item_id = id, user_id = auth.user_id, "Budget item updated");

    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{project_id}/budget-items/{id}
// ---------------------------------------------------------------------------

/// Delete a budget line.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = BudgetItemRepo::delete(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("BudgetItem", id)));
    }

    tracing::info!(project_id, budget_item_id = id, user_id = auth.user_id, "Budget item deleted");

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted },
    }))
}
