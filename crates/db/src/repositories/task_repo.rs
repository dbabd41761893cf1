//! Repository for the `tasks` table.

use sqlx::PgPool;

use planhaus_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list for `tasks` queries.
const COLUMNS: &str =
    "id, project_id, title, description, category, priority, due_date, status, \
     created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, category, priority, due_date, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'medium'), $6, COALESCE($7, 'todo'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Insert many tasks atomically, preserving input order.
    pub async fn create_bulk(
        pool: &PgPool,
        project_id: DbId,
        inputs: &[CreateTask],
    ) -> Result<Vec<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, category, priority, due_date, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'medium'), $6, COALESCE($7, 'todo'))
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let task = sqlx::query_as::<_, Task>(&query)
                .bind(project_id)
                .bind(&input.title)
                .bind(&input.description)
                .bind(&input.category)
                .bind(&input.priority)
                .bind(input.due_date)
                .bind(&input.status)
                .fetch_one(&mut *tx)
                .await?;
            created.push(task);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Find a task by ID within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tasks: dated ones first by due date, then the rest
    /// by creation order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE project_id = $1 \
             ORDER BY due_date ASC NULLS LAST, id ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                priority = COALESCE($6, priority),
                due_date = COALESCE($7, due_date),
                status = COALESCE($8, status)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns whether a row was deleted.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
