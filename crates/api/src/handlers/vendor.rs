//! Handlers for the `/projects/{project_id}/vendors` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use planhaus_core::error::CoreError;
use planhaus_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use planhaus_core::types::DbId;
use planhaus_core::vendors::VendorCategory;
use planhaus_db::models::vendor::{CreateVendor, UpdateVendor};
use planhaus_db::repositories::VendorRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_project_exists;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// Accepted vendor pipeline states.
const VENDOR_STATUSES: &[&str] = &["researching", "contacted", "booked", "rejected"];

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Pagination parameters for listing vendors.
#[derive(Debug, Deserialize)]
pub struct ListVendorsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_vendor_fields(
    name: Option<&str>,
    category: Option<&str>,
    status: Option<&str>,
) -> AppResult<()> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Vendor name cannot be empty".to_string(),
            )));
        }
    }
    if let Some(category) = category {
        VendorCategory::from_str_db(category)?;
    }
    if let Some(status) = status {
        if !VENDOR_STATUSES.contains(&status) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid vendor status '{status}'. Must be one of: {}",
                VENDOR_STATUSES.join(", ")
            ))));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/vendors
// ---------------------------------------------------------------------------

/// Add a vendor to the pipeline.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(body): Json<CreateVendor>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;
    check_vendor_fields(
        Some(body.name.as_str()),
        Some(body.category.as_str()),
        body.status.as_deref(),
    )?;

    let vendor = VendorRepo::create(&state.pool, project_id, &body).await?;

    tracing::info!(
        project_id,
        vendor_id = vendor.id,
        category = %vendor.category,
        user_id = auth.user_id,
        "Vendor created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: vendor })))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/vendors
// ---------------------------------------------------------------------------

/// List a project's vendors grouped by category.
pub async fn list_by_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<DbId>,
    Query(params): Query<ListVendorsParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let items = VendorRepo::list_by_project(&state.pool, project_id, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/vendors/{id}
// ---------------------------------------------------------------------------

/// Get a single vendor.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let vendor = VendorRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Vendor", id)))?;
    Ok(Json(DataResponse { data: vendor }))
}

// ---------------------------------------------------------------------------
// PATCH /projects/{project_id}/vendors/{id}
// ---------------------------------------------------------------------------

/// Partially update a vendor.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(body): Json<UpdateVendor>,
) -> AppResult<impl IntoResponse> {
    check_vendor_fields(
        body.name.as_deref(),
        body.category.as_deref(),
        body.status.as_deref(),
    )?;

    let vendor = VendorRepo::update(&state.pool, project_id, id, &body)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Vendor", id)))?;

    tracing::info!(project_id, vendor_id = id, user_id = auth.user_id, "Vendor updated");

    Ok(Json(DataResponse { data: vendor }))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{project_id}/vendors/{id}
// ---------------------------------------------------------------------------

/// Delete a vendor.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let deleted = VendorRepo::delete(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Vendor", id)));
    }

    tracing::info!(project_id, vendor_id = id, user_id = auth.user_id, "Vendor deleted");

    Ok(Json(DataResponse {
        data: DeletedResponse { deleted },
    }))
}
