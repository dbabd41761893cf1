//! Repository for the `budget_items` table.

use sqlx::PgPool;

use planhaus_core::types::DbId;

use crate::models::budget_item::{BudgetItem, CreateBudgetItem, UpdateBudgetItem};

/// Column list for `budget_items` queries.
const COLUMNS: &str =
    "id, project_id, category, percent, hard_cap, estimated_cost, actual_cost, notes, \
     created_at, updated_at";

/// Provides CRUD operations for budget items.
pub struct BudgetItemRepo;

impl BudgetItemRepo {
    /// Insert a new budget item.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateBudgetItem,
    ) -> Result<BudgetItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO budget_items (project_id, category, percent, hard_cap, estimated_cost, \
             actual_cost, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BudgetItem>(&query)
            .bind(project_id)
            .bind(&input.category)
            .bind(input.percent)
            .bind(input.hard_cap)
            .bind(input.estimated_cost)
            .bind(input.actual_cost)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a budget item by ID within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<BudgetItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM budget_items WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, BudgetItem>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's budget items in insertion order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<BudgetItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM budget_items WHERE project_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, BudgetItem>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a budget item. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateBudgetItem,
    ) -> Result<Option<BudgetItem>, sqlx::Error> {
        let query = format!(
            "UPDATE budget_items SET
                category = COALESCE($3, category),
                percent = COALESCE($4, percent),
                hard_cap = COALESCE($5, hard_cap),
                estimated_cost = COALESCE($6, estimated_cost),
                actual_cost = COALESCE($7, actual_cost),
                notes = COALESCE($8, notes)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BudgetItem>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.category)
            .bind(input.percent)
            .bind(input.hard_cap)
            .bind(input.estimated_cost)
            .bind(input.actual_cost)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a budget item. Returns whether a row was deleted.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM budget_items WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
