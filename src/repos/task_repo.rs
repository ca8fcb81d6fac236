/*
 * Responsibility
 * - task table CRUD
 * - description is unique (duplicate insert → RepoError::Conflict)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: i32,
    pub description: String,
}

pub async fn list(db: &PgPool) -> Result<Vec<TaskRow>, RepoError> {
    let rows = sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT id, description
        FROM task
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, description: &str) -> Result<TaskRow, RepoError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        INSERT INTO task (description)
        VALUES ($1)
        RETURNING id, description
        "#,
    )
    .bind(description)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn find_by_description(
    db: &PgPool,
    description: &str,
) -> Result<Option<TaskRow>, RepoError> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT id, description
        FROM task
        WHERE description = $1
        "#,
    )
    .bind(description)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, task_id: i32) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM task
        WHERE id = $1
        "#,
    )
    .bind(task_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
