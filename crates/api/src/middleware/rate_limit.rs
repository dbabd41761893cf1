//! Fixed-window rate limiting for mutating routes.
//!
//! The counter store is an explicit object injected through `AppState`
//! rather than a process-wide map, so instances and tests stay isolated.
//! Windows reset lazily when a key is next seen; [`RateLimiter::sweep_stale`]
//! drops keys that have gone quiet.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Per-key fixed-window request counters.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request against `key`. Returns whether it fits the budget.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate limiter poisoned");
        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        // Lazy reset once the window has elapsed.
        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.limit {
            return false;
        }
        window.count += 1;
        true
    }

    /// Drop windows that elapsed without further traffic; returns how many.
    pub fn sweep_stale(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate limiter poisoned");
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.started_at) < self.window);
        before - windows.len()
    }
}

/// Axum middleware: budget mutating requests per caller.
///
/// The key is the Authorization header when present (one budget per
/// session) and the literal `"anon"` otherwise. Reads pass through
/// uncounted.
pub async fn enforce(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let is_mutation = matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );
    if is_mutation {
        let key = request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("anon");
        if !state.rate_limiter.check(key) {
            tracing::warn!(path = %request.uri().path(), "Rate limit exceeded");
            return Err(AppError::RateLimited);
        }
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check("k"));
        assert!(limiter.check("k"));
        assert!(limiter.check("k"));
        assert!(!limiter.check("k"));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("a"));
        assert!(limiter.check("b"));
        assert!(!limiter.check("a"));
    }

    #[test]
    fn window_resets_lazily() {
        let limiter = RateLimiter::new(1, Duration::from_millis(0));
        assert!(limiter.check("k"));
        // Zero-length window: the next check starts a fresh one.
        assert!(limiter.check("k"));
    }

    #[test]
    fn sweep_drops_elapsed_windows() {
        let limiter = RateLimiter::new(1, Duration::from_millis(0));
        limiter.check("a");
        limiter.check("b");
        assert_eq!(limiter.sweep_stale(), 2);
    }
}
