//! In-memory session store.
//!
//! Token issuance (login) belongs to the external auth gateway; this store
//! is the backend's view of who holds a valid session. It is an explicit
//! object injected through `AppState`, never a module-level static, so
//! separate server instances and test runs cannot share or leak sessions.
//! Expiry is checked lazily on read, with [`SessionStore::sweep_expired`]
//! available for periodic cleanup.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::Rng;

use planhaus_core::types::DbId;

/// Length of generated session tokens (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 48;

#[derive(Debug, Clone)]
struct Session {
    user_id: DbId,
    expires_at: Instant,
}

/// Token -> session map with TTL-based expiry.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a session for a user and return the fresh token.
    pub fn issue(&self, user_id: DbId) -> String {
        let token: String = rand::rng()
            .sample_iter(&rand::distr::Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        self.insert(token.clone(), user_id);
        token
    }

    /// Register an externally issued token for a user.
    pub fn insert(&self, token: String, user_id: DbId) {
        let session = Session {
            user_id,
            expires_at: Instant::now() + self.ttl,
        };
        self.sessions
            .lock()
            .expect("session store poisoned")
            .insert(token, session);
    }

    /// Resolve a token to a user, dropping the session if it has expired.
    pub fn resolve(&self, token: &str) -> Option<DbId> {
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        match sessions.get(token) {
            Some(session) if session.expires_at > Instant::now() => Some(session.user_id),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Invalidate a token. Returns whether a session existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .remove(token)
            .is_some()
    }

    /// Drop every expired session; returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }

    /// Number of live entries (expired-but-unswept included).
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
