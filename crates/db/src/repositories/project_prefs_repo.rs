//! Repository for the `project_prefs` table (one row per project).

use sqlx::PgPool;

use planhaus_core::types::DbId;

use crate::models::project_prefs::{ProjectPrefs, UpdateProjectPrefs};

/// Column list for `project_prefs` queries.
const COLUMNS: &str = "id, project_id, vendor_filters, site_content, guest_prefs, event_details, \
     created_at, updated_at";

/// Provides read/upsert operations for project preferences.
pub struct ProjectPrefsRepo;

impl ProjectPrefsRepo {
    /// Find the preferences row for a project.
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ProjectPrefs>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_prefs WHERE project_id = $1");
        sqlx::query_as::<_, ProjectPrefs>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert any subset of the preference payloads.
    ///
    /// `None` inputs leave the stored payload untouched; a present payload
    /// replaces its column wholesale (no deep merge).
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        input: &UpdateProjectPrefs,
    ) -> Result<ProjectPrefs, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_prefs (project_id, vendor_filters, site_content, guest_prefs, \
             event_details)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (project_id) DO UPDATE SET
                vendor_filters = COALESCE(EXCLUDED.vendor_filters, project_prefs.vendor_filters),
                site_content = COALESCE(EXCLUDED.site_content, project_prefs.site_content),
                guest_prefs = COALESCE(EXCLUDED.guest_prefs, project_prefs.guest_prefs),
                event_details = COALESCE(EXCLUDED.event_details, project_prefs.event_details)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectPrefs>(&query)
            .bind(project_id)
            .bind(&input.vendor_filters)
            .bind(&input.site_content)
            .bind(&input.guest_prefs)
            .bind(&input.event_details)
            .fetch_one(pool)
            .await
    }
}
