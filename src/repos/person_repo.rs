/*
 * Responsibility
 * - person table SQLx operations
 * - (name, ssn) is unique → RepoError::Conflict
 * - deleting a person cascades to its persontasks rows
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct PersonRow {
    pub id: i32,
    pub name: String,
    pub ssn: String,
}

pub async fn list(db: &PgPool) -> Result<Vec<PersonRow>, RepoError> {
    let rows = sqlx::query_as::<_, PersonRow>(
        r#"
        SELECT id, name, ssn
        FROM person
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, name: &str, ssn: &str) -> Result<PersonRow, RepoError> {
    let row = sqlx::query_as::<_, PersonRow>(
        r#"
        INSERT INTO person (name, ssn)
        VALUES ($1, $2)
        RETURNING id, name, ssn
        "#,
    )
    .bind(name)
    .bind(ssn)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn exists(db: &PgPool, person_id: i32) -> Result<bool, RepoError> {
    let found: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (SELECT 1 FROM person WHERE id = $1)
        "#,
    )
    .bind(person_id)
    .fetch_one(db)
    .await?;

    Ok(found)
}

pub async fn find(db: &PgPool, name: &str, ssn: &str) -> Result<Option<PersonRow>, RepoError> {
    let row = sqlx::query_as::<_, PersonRow>(
        r#"
        SELECT id, name, ssn
        FROM person
        WHERE name = $1 AND ssn = $2
        "#,
    )
    .bind(name)
    .bind(ssn)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, person_id: i32) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM person
        WHERE id = $1
        "#,
    )
    .bind(person_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn create_find_and_list(pool: PgPool) -> Result<(), anyhow::Error> {
        let alice = create(&pool, "Alice", "111-22-3333").await?;
        create(&pool, "Bob", "444-55-6666").await?;

        let found = find(&pool, "Alice", "111-22-3333").await?;
        assert_eq!(found.map(|p| p.id), Some(alice.id));
        assert!(find(&pool, "Alice", "000-00-0000").await?.is_none());

        let names: Vec<_> = list(&pool).await?.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn duplicate_name_and_ssn_is_conflict(pool: PgPool) -> Result<(), anyhow::Error> {
        create(&pool, "Alice", "111-22-3333").await?;

        let err = create(&pool, "Alice", "111-22-3333").await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict));

        // Same name, different ssn is another person.
        create(&pool, "Alice", "999-88-7777").await?;
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete_reports_whether_a_row_went(pool: PgPool) -> Result<(), anyhow::Error> {
        let alice = create(&pool, "Alice", "111-22-3333").await?;

        assert!(exists(&pool, alice.id).await?);
        assert!(delete(&pool, alice.id).await?);
        assert!(!exists(&pool, alice.id).await?);
        assert!(!delete(&pool, alice.id).await?);
        Ok(())
    }
}
