//! Project preferences row: the prefill targets that are not first-class
//! entities (vendor filters, site content, guest policies, event details).
//!
//! One row per project; the four payloads are stored as JSONB and typed in
//! `planhaus_core::prefill` on the way in and out.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use planhaus_core::types::{DbId, Timestamp};

/// A row from the `project_prefs` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct ProjectPrefs {
    pub id: DbId,
    pub project_id: DbId,
    pub vendor_filters: Option<serde_json::Value>,
    pub site_content: Option<serde_json::Value>,
    pub guest_prefs: Option<serde_json::Value>,
    pub event_details: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for replacing any subset of the preference payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectPrefs {
    pub vendor_filters: Option<serde_json::Value>,
    pub site_content: Option<serde_json::Value>,
    pub guest_prefs: Option<serde_json::Value>,
    pub event_details: Option<serde_json::Value>,
}
