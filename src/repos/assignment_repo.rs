/*
 * Responsibility
 * - persontasks (person ↔ task assignment) operations
 * - (personid, taskid, startdate) identifies an assignment
 * - unknown person/task on insert → RepoError::MissingReference
 */
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub personid: i32,
    pub taskid: i32,
    pub startdate: NaiveDateTime,
    pub dueby: NaiveDateTime,
    pub status: String,
}

pub async fn create(
    db: &PgPool,
    person_id: i32,
    task_id: i32,
    start_date: NaiveDateTime,
    due_by: NaiveDateTime,
    status: &str,
) -> Result<AssignmentRow, RepoError> {
    let row = sqlx::query_as::<_, AssignmentRow>(
        r#"
        INSERT INTO persontasks (personid, taskid, startdate, dueby, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING personid, taskid, startdate, dueby, status
        "#,
    )
    .bind(person_id)
    .bind(task_id)
    .bind(start_date)
    .bind(due_by)
    .bind(status)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update_status(
    db: &PgPool,
    person_id: i32,
    task_id: i32,
    start_date: NaiveDateTime,
    status: &str,
) -> Result<Option<AssignmentRow>, RepoError> {
    let row = sqlx::query_as::<_, AssignmentRow>(
        r#"
        UPDATE persontasks
        SET status = $4
        WHERE personid = $1 AND taskid = $2 AND startdate = $3
        RETURNING personid, taskid, startdate, dueby, status
        "#,
    )
    .bind(person_id)
    .bind(task_id)
    .bind(start_date)
    .bind(status)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn list_for_person(db: &PgPool, person_id: i32) -> Result<Vec<AssignmentRow>, RepoError> {
    let rows = sqlx::query_as::<_, AssignmentRow>(
        r#"
        SELECT personid, taskid, startdate, dueby, status
        FROM persontasks
        WHERE personid = $1
        ORDER BY startdate, taskid
        "#,
    )
    .bind(person_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
