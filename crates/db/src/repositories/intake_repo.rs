//! Repository for the `intake_records` table.
//!
//! One record per project (`uq_intake_records_project`). Step saves are
//! upserts: the first save of any step creates the draft row.

use sqlx::PgPool;

use planhaus_core::types::DbId;

use crate::models::intake::IntakeRow;

/// Column list for `intake_records` queries.
const COLUMNS: &str = "id, project_id, created_by_id, data, current_step, \
     is_submitted, submitted_at, created_at, updated_at";

/// Provides CRUD operations for intake records.
pub struct IntakeRepo;

impl IntakeRepo {
    /// Find the intake record for a project.
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<IntakeRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM intake_records WHERE project_id = $1");
        sqlx::query_as::<_, IntakeRow>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Save one wizard step, creating the draft record on first save.
    ///
    /// `step_field` is the JSON field name (`"step1"`..`"step7"`) and
    /// `payload` the already-validated step object. `current_step` tracks
    /// the highest step the client has shown.
    pub async fn save_step(
        pool: &PgPool,
        project_id: DbId,
        created_by_id: DbId,
        step_field: &str,
        step_number: i32,
        payload: &serde_json::Value,
    ) -> Result<IntakeRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO intake_records (project_id, created_by_id, data, current_step)
             VALUES ($1, $2, jsonb_build_object($3::text, $4::jsonb), $5)
             ON CONFLICT (project_id) DO UPDATE
             SET data = jsonb_set(intake_records.data, ARRAY[$3::text], $4::jsonb, true),
                 current_step = GREATEST(intake_records.current_step, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IntakeRow>(&query)
            .bind(project_id)
            .bind(created_by_id)
            .bind(step_field)
            .bind(payload)
            .bind(step_number)
            .fetch_one(pool)
            .await
    }

    /// Mark a record submitted. Returns `None` if the project has no record.
    pub async fn mark_submitted(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<IntakeRow>, sqlx::Error> {
        let query = format!(
            "UPDATE intake_records
             SET is_submitted = TRUE, submitted_at = NOW()
             WHERE project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IntakeRow>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}
