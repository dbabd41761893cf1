//! Health check route.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// Routes mounted at the application root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness plus a database ping.
async fn health(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    planhaus_db::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
