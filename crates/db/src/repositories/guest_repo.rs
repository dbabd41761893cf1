//! Repository for the `guests` table.

use sqlx::PgPool;

use planhaus_core::types::DbId;

use crate::models::guest::{CreateGuest, Guest, UpdateGuest};

/// Column list for `guests` queries.
const COLUMNS: &str =
    "id, project_id, first_name, last_name, email, phone, side, dietary_notes, \
     rsvp_status, created_at, updated_at";

/// Provides CRUD operations for guests.
pub struct GuestRepo;

impl GuestRepo {
    /// Insert a new guest.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateGuest,
    ) -> Result<Guest, sqlx::Error> {
        let query = format!(
            "INSERT INTO guests (project_id, first_name, last_name, email, phone, side, \
             dietary_notes, rsvp_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'pending'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(project_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.side)
            .bind(&input.dietary_notes)
            .bind(&input.rsvp_status)
            .fetch_one(pool)
            .await
    }

    /// Find a guest by ID within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guests WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Guest>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's guests alphabetically.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Guest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guests WHERE project_id = $1 \
             ORDER BY first_name ASC, last_name ASC NULLS LAST, id ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a guest. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateGuest,
    ) -> Result<Option<Guest>, sqlx::Error> {
        let query = format!(
            "UPDATE guests SET
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                side = COALESCE($7, side),
                dietary_notes = COALESCE($8, dietary_notes),
                rsvp_status = COALESCE($9, rsvp_status)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Guest>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.side)
            .bind(&input.dietary_notes)
            .bind(&input.rsvp_status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a guest. Seating assignments cascade with the row.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
