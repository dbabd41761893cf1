use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;
use crate::sessions::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The session
/// store and rate limiter live here deliberately: passing them through
/// state keeps server instances and tests isolated from each other.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: planhaus_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Session token store (populated by the external auth gateway).
    pub sessions: Arc<SessionStore>,
    /// Per-key request budget for mutating routes.
    pub rate_limiter: Arc<RateLimiter>,
}
