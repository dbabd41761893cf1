//! Transactional application of a prefill bundle.
//!
//! The mapped bundle touches four surfaces: the project row, budget items,
//! tasks, and the preferences row. All writes happen in ONE transaction;
//! a failure anywhere rolls everything back, so a project never ends up
//! half-seeded.

use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Transaction;

use planhaus_core::prefill::PrefillBundle;
use planhaus_core::types::DbId;

/// Summary of what one apply call wrote.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PrefillApplied {
    pub budget_items: usize,
    pub tasks: usize,
    pub prefs_updated: bool,
}

/// Applies mapped intake bundles to a project.
pub struct PrefillRepo;

impl PrefillRepo {
    /// Apply the whole bundle inside one transaction.
    ///
    /// Returns `sqlx::Error::RowNotFound` when the project does not exist
    /// (or is soft-deleted), which the API layer maps to a 404. Budget
    /// items and tasks are appended, not reconciled; callers gate repeat
    /// application.
    pub async fn apply_bundle(
        pool: &PgPool,
        project_id: DbId,
        bundle: &PrefillBundle,
    ) -> Result<PrefillApplied, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let meta = &bundle.project_meta;
        let updated = sqlx::query(
            "UPDATE projects SET
                name = $2,
                wedding_date = COALESCE($3, wedding_date),
                location = COALESCE($4, location),
                guest_count = COALESCE($5, guest_count),
                style_tags = CASE WHEN cardinality($6::text[]) > 0 THEN $6 ELSE style_tags END
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(project_id)
        .bind(&meta.title)
        .bind(meta.wedding_date)
        .bind(&meta.location)
        .bind(meta.guest_count)
        .bind(&meta.style_tags)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        let mut budget_items = 0;
        if let Some(plan) = &bundle.budget_plan {
            for line in &plan.categories {
                sqlx::query(
                    "INSERT INTO budget_items (project_id, category, percent, hard_cap, \
                     estimated_cost)
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(project_id)
                .bind(&line.category)
                .bind(line.percent)
                .bind(line.hard_cap)
                .bind(line.estimated_cost)
                .execute(&mut *tx)
                .await?;
                budget_items += 1;
            }
        }

        let mut tasks = 0;
        for task in &bundle.timeline {
            sqlx::query(
                "INSERT INTO tasks (project_id, title, description, category, priority, \
                 due_date, status)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(project_id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(&task.category)
            .bind(task.priority.as_str())
            .bind(task.due_date)
            .bind(task.status.as_str())
            .execute(&mut *tx)
            .await?;
            tasks += 1;
        }

        let prefs_updated = Self::upsert_prefs(&mut tx, project_id, bundle).await?;

        tx.commit().await?;
        Ok(PrefillApplied {
            budget_items,
            tasks,
            prefs_updated,
        })
    }

    async fn upsert_prefs(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        bundle: &PrefillBundle,
    ) -> Result<bool, sqlx::Error> {
        let vendor_filters = to_json(&bundle.vendor_filters);
        let site_content = to_json(&bundle.site_content);
        let guest_prefs = to_json(&bundle.guest_prefs);
        let event_details = to_json(&bundle.event_details);

        if vendor_filters.is_none()
            && site_content.is_none()
            && guest_prefs.is_none()
            && event_details.is_none()
        {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO project_prefs (project_id, vendor_filters, site_content, guest_prefs, \
             event_details)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (project_id) DO UPDATE SET
                vendor_filters = COALESCE(EXCLUDED.vendor_filters, project_prefs.vendor_filters),
                site_content = COALESCE(EXCLUDED.site_content, project_prefs.site_content),
                guest_prefs = COALESCE(EXCLUDED.guest_prefs, project_prefs.guest_prefs),
                event_details = COALESCE(EXCLUDED.event_details, project_prefs.event_details)",
        )
        .bind(project_id)
        .bind(vendor_filters)
        .bind(site_content)
        .bind(guest_prefs)
        .bind(event_details)
        .execute(&mut **tx)
        .await?;
        Ok(true)
    }
}

fn to_json<T: serde::Serialize>(value: &Option<T>) -> Option<serde_json::Value> {
    value
        .as_ref()
        .map(|v| serde_json::to_value(v).expect("plain struct serializes"))
}
