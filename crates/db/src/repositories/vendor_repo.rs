//! Repository for the `vendors` table.

use sqlx::PgPool;

use planhaus_core::types::DbId;

use crate::models::vendor::{CreateVendor, UpdateVendor, Vendor};

/// Column list for `vendors` queries.
const COLUMNS: &str = "id, project_id, name, category, email, phone, website, notes, status, \
     created_at, updated_at";

/// Provides CRUD operations for vendors.
pub struct VendorRepo;

impl VendorRepo {
    /// Insert a new vendor.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateVendor,
    ) -> Result<Vendor, sqlx::Error> {
        let query = format!(
            "INSERT INTO vendors (project_id, name, category, email, phone, website, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'researching'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(&input.notes)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a vendor by ID within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's vendors grouped by category, then name.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Vendor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendors WHERE project_id = $1 \
             ORDER BY category ASC, name ASC, id ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a vendor. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateVendor,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!(
            "UPDATE vendors SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                website = COALESCE($7, website),
                notes = COALESCE($8, notes),
                status = COALESCE($9, status)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(&input.notes)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a vendor. Returns whether a row was deleted.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
