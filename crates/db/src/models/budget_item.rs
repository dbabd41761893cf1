//! Budget item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use planhaus_core::types::{DbId, Timestamp};

/// A budget line from the `budget_items` table.
///
/// `category` is gated by [`planhaus_core::budget::BudgetCategory`] at the
/// API boundary. `estimated_cost` follows the hard-cap-wins rule when rows
/// are seeded from intake data.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct BudgetItem {
    pub id: DbId,
    pub project_id: DbId,
    pub category: String,
    pub percent: Option<f64>,
    pub hard_cap: Option<f64>,
    pub estimated_cost: f64,
    pub actual_cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new budget item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBudgetItem {
    pub category: String,
    pub percent: Option<f64>,
    pub hard_cap: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub notes: Option<String>,
}

/// DTO for updating an existing budget item. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBudgetItem {
    pub category: Option<String>,
    pub percent: Option<f64>,
    pub hard_cap: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub notes: Option<String>,
}
