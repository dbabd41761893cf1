//! Intake record entity model and DTOs.
//!
//! The seven wizard steps live in the `data` JSONB column; the typed form
//! is [`planhaus_core::intake::record::IntakeRecord`], produced by
//! [`IntakeRow::record`]. The row keeps wizard bookkeeping alongside.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use planhaus_core::intake::record::IntakeRecord;
use planhaus_core::types::{DbId, Timestamp};

/// A row from the `intake_records` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct IntakeRow {
    pub id: DbId,
    pub project_id: DbId,
    pub created_by_id: DbId,
    pub data: serde_json::Value,
    pub current_step: i32,
    pub is_submitted: bool,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl IntakeRow {
    /// Deserialize the JSONB step data into the typed record.
    ///
    /// An unparseable column (something other than this backend wrote it)
    /// degrades to an empty record rather than failing the request.
    pub fn record(&self) -> IntakeRecord {
        serde_json::from_value(self.data.clone()).unwrap_or_else(|e| {
            tracing::warn!(
                intake_id = self.id,
                error = %e,
                "Unparseable intake data; treating as empty"
            );
            IntakeRecord::default()
        })
    }
}

/// DTO for saving one wizard step (the autosave/draft path).
#[derive(Debug, Clone, Deserialize)]
pub struct SaveIntakeStep {
    pub payload: serde_json::Value,
}
