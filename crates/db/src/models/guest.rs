//! Guest entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use planhaus_core::types::{DbId, Timestamp};

/// A guest row from the `guests` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Guest {
    pub id: DbId,
    pub project_id: DbId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Whose side of the aisle: "partner_a" | "partner_b" | "both".
    pub side: Option<String>,
    pub dietary_notes: Option<String>,
    pub rsvp_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new guest.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGuest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub side: Option<String>,
    pub dietary_notes: Option<String>,
    /// Defaults to "pending" if omitted.
    pub rsvp_status: Option<String>,
}

/// DTO for updating an existing guest. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGuest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub side: Option<String>,
    pub dietary_notes: Option<String>,
    pub rsvp_status: Option<String>,
}
