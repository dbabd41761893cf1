//! Task entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use planhaus_core::types::{DbId, Timestamp};

/// A task row from the `tasks` table.
///
/// `priority` and `status` are text columns gated by
/// [`planhaus_core::tasks::TaskPriority`] / [`planhaus_core::tasks::TaskStatus`]
/// at the API boundary.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Defaults to "medium" if omitted.
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    /// Defaults to "todo" if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}
