//! Seating table and assignment models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use planhaus_core::types::{DbId, Timestamp};

/// A table on the seating chart.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct SeatingTable {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub max_seats: i32,
    pub position_x: f64,
    pub position_y: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a seating table.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSeatingTable {
    pub name: String,
    /// Defaults to 8 if omitted.
    pub max_seats: Option<i32>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
}

/// DTO for updating a seating table. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSeatingTable {
    pub name: Option<String>,
    pub max_seats: Option<i32>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
}

/// A guest-to-table assignment. At most one per guest
/// (`uq_seating_assignments_guest`).
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct SeatingAssignment {
    pub id: DbId,
    pub project_id: DbId,
    pub table_id: DbId,
    pub guest_id: DbId,
    pub seat_number: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning (or moving) a guest.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignGuest {
    pub guest_id: DbId,
    pub table_id: DbId,
    pub seat_number: Option<i32>,
}
