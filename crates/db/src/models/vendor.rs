//! Vendor entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use planhaus_core::types::{DbId, Timestamp};

/// A vendor row from the `vendors` table.
///
/// `category` is gated by [`planhaus_core::vendors::VendorCategory`] at the
/// API boundary.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Vendor {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub category: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    /// "researching" | "contacted" | "booked" | "rejected"
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new vendor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVendor {
    pub name: String,
    pub category: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    /// Defaults to "researching" if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing vendor. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVendor {
    pub name: Option<String>,
    pub category: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}
