//! Repository for the `seating_tables` table.

use sqlx::PgPool;

use planhaus_core::types::DbId;

use crate::models::seating::{CreateSeatingTable, SeatingTable, UpdateSeatingTable};

/// Column list for `seating_tables` queries.
const COLUMNS: &str = "id, project_id, name, max_seats, position_x, position_y, \
     created_at, updated_at";

/// Provides CRUD operations for seating tables.
pub struct SeatingTableRepo;

impl SeatingTableRepo {
    /// Insert a new seating table.
    ///
    /// If `max_seats` is `None` in the input, defaults to 8.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateSeatingTable,
    ) -> Result<SeatingTable, sqlx::Error> {
        let query = format!(
            "INSERT INTO seating_tables (project_id, name, max_seats, position_x, position_y)
             VALUES ($1, $2, COALESCE($3, 8), COALESCE($4, 0), COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.max_seats)
            .bind(input.position_x)
            .bind(input.position_y)
            .fetch_one(pool)
            .await
    }

    /// Find a seating table by ID within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<SeatingTable>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM seating_tables WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tables in creation order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<SeatingTable>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM seating_tables WHERE project_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a seating table. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateSeatingTable,
    ) -> Result<Option<SeatingTable>, sqlx::Error> {
        let query = format!(
            "UPDATE seating_tables SET
                name = COALESCE($3, name),
                max_seats = COALESCE($4, max_seats),
                position_x = COALESCE($5, position_x),
                position_y = COALESCE($6, position_y)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeatingTable>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.max_seats)
            .bind(input.position_x)
            .bind(input.position_y)
            .fetch_optional(pool)
            .await
    }

    /// Delete a seating table. Its assignments cascade with the row.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seating_tables WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
