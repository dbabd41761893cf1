//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use planhaus_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub wedding_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub guest_count: Option<i32>,
    pub style_tags: Vec<String>,
    pub created_by_id: DbId,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub wedding_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub guest_count: Option<i32>,
    pub style_tags: Option<Vec<String>>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub guest_count: Option<i32>,
    pub style_tags: Option<Vec<String>>,
}
