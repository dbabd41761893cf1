//! Repository for the `seating_assignments` table.
//!
//! Assignment is the one place with a multi-statement mutation: a move is
//! delete-then-insert. The whole sequence runs inside one transaction with
//! the table row locked, and the unique constraint on `guest_id` backstops
//! any concurrent assign for the same guest.

use sqlx::PgPool;

use planhaus_core::error::CoreError;
use planhaus_core::seating;
use planhaus_core::types::DbId;

use crate::models::seating::{AssignGuest, SeatingAssignment};

/// Column list for `seating_assignments` queries.
const COLUMNS: &str = "id, project_id, table_id, guest_id, seat_number, created_at, updated_at";

/// Error from an assignment attempt: either a domain rule (capacity, seat
/// collision, unknown table/guest) or a database failure.
#[derive(Debug, thiserror::Error)]
pub enum AssignError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Provides assignment operations for the seating chart.
pub struct SeatingAssignmentRepo;

impl SeatingAssignmentRepo {
    /// Assign a guest to a table, replacing any previous assignment.
    ///
    /// Enforced inside the transaction:
    /// - the table and guest must belong to the project
    /// - a numbered seat must exist and be free
    /// - the table must have an open seat (moves within one table do not
    ///   count the guest against itself)
    pub async fn assign(
        pool: &PgPool,
        project_id: DbId,
        input: &AssignGuest,
    ) -> Result<SeatingAssignment, AssignError> {
        let mut tx = pool.begin().await?;

        // Lock the table row so two concurrent assigns serialize on it.
        let table: Option<(i32,)> = sqlx::query_as(
            "SELECT max_seats FROM seating_tables WHERE id = $1 AND project_id = $2 FOR UPDATE",
        )
        .bind(input.table_id)
        .bind(project_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (max_seats,) =
            table.ok_or_else(|| CoreError::not_found("SeatingTable", input.table_id))?;

        let guest_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM guests WHERE id = $1 AND project_id = $2)")
                .bind(input.guest_id)
                .bind(project_id)
                .fetch_one(&mut *tx)
                .await?;
        if !guest_exists.0 {
            return Err(CoreError::not_found("Guest", input.guest_id).into());
        }

        if let Some(seat) = input.seat_number {
            seating::validate_seat_number(seat, max_seats)?;
            let taken: (bool,) = sqlx::query_as(
                "SELECT EXISTS(SELECT 1 FROM seating_assignments \
                 WHERE table_id = $1 AND seat_number = $2 AND guest_id <> $3)",
            )
            .bind(input.table_id)
            .bind(seat)
            .bind(input.guest_id)
            .fetch_one(&mut *tx)
            .await?;
            seating::check_seat_free(taken.0, seat)?;
        }

        // Occupancy excluding this guest, so a within-table move never
        // trips the capacity check.
        let occupancy: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM seating_assignments WHERE table_id = $1 AND guest_id <> $2",
        )
        .bind(input.table_id)
        .bind(input.guest_id)
        .fetch_one(&mut *tx)
        .await?;
        seating::check_capacity(occupancy.0, max_seats)?;

        // Move semantics: replace, never merge.
        sqlx::query("DELETE FROM seating_assignments WHERE guest_id = $1")
            .bind(input.guest_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO seating_assignments (project_id, table_id, guest_id, seat_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, SeatingAssignment>(&query)
            .bind(project_id)
            .bind(input.table_id)
            .bind(input.guest_id)
            .bind(input.seat_number)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// Remove a guest's assignment. Returns whether a row existed.
    pub async fn remove_by_guest(
        pool: &PgPool,
        project_id: DbId,
        guest_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM seating_assignments WHERE guest_id = $1 AND project_id = $2")
                .bind(guest_id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a guest's current assignment.
    pub async fn find_by_guest(
        pool: &PgPool,
        guest_id: DbId,
    ) -> Result<Option<SeatingAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seating_assignments WHERE guest_id = $1");
        sqlx::query_as::<_, SeatingAssignment>(&query)
            .bind(guest_id)
            .fetch_optional(pool)
            .await
    }

    /// List all assignments for a project's seating chart.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<SeatingAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM seating_assignments WHERE project_id = $1 \
             ORDER BY table_id ASC, seat_number ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, SeatingAssignment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Count assignments at one table.
    pub async fn count_by_table(pool: &PgPool, table_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM seating_assignments WHERE table_id = $1")
                .bind(table_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
