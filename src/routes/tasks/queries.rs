use sqlx::{PgPool, Result};
use uuid::Uuid;

use super::model::Task;

pub async fn create_task(
    pool: &PgPool,
    owner_id: Uuid,
    title: &str,
    description: Option<&str>,
    complete: bool,
) -> Result<Task> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (id, owner_id, title, description, complete)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, owner_id, title, description, complete, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .bind(complete)
    .fetch_one(pool)
    .await?;

    Ok(rec)
}

/// Every task the owner may see, in creation order.
pub async fn tasks_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, owner_id, title, description, complete, created_at
        FROM tasks
        WHERE owner_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rec)
}

/// None when the id does not exist or belongs to someone else; the two
/// cases are indistinguishable on purpose.
pub async fn find_task(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<Option<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, owner_id, title, description, complete, created_at
        FROM tasks
        WHERE id = $2 AND owner_id = $1
        "#,
    )
    .bind(owner_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(rec)
}

pub async fn update_task(
    pool: &PgPool,
    owner_id: Uuid,
    id: Uuid,
    title: Option<String>,
    description: Option<String>,
    complete: Option<bool>,
) -> Result<Option<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            complete = COALESCE($5, complete)
        WHERE id = $2 AND owner_id = $1
        RETURNING id, owner_id, title, description, complete, created_at
        "#,
    )
    .bind(owner_id)
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(complete)
    .fetch_optional(pool)
    .await?;

    Ok(rec)
}

pub async fn delete_task(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<bool> {
    let res = sqlx::query(
        r#"
        DELETE FROM tasks
        WHERE id = $1 AND owner_id = $2
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    Ok(res.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(pool: &PgPool, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(email)
        .bind("unused-hash")
        .execute(pool)
        .await
        .unwrap();

        id
    }

    #[sqlx::test]
    async fn test_create_then_list_round_trip(pool: PgPool) {
        let owner = seed_user(&pool, "owner@example.com").await;

        let created = create_task(&pool, owner, "Buy milk", None, false)
            .await
            .unwrap();

        let tasks = tasks_for_owner(&pool, owner).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, created.id);
        assert_eq!(tasks[0].owner_id, owner);
        assert!(!tasks[0].complete);
    }

    #[sqlx::test]
    async fn test_tasks_are_invisible_to_other_users(pool: PgPool) {
        let owner = seed_user(&pool, "owner@example.com").await;
        let other = seed_user(&pool, "other@example.com").await;

        let created = create_task(&pool, owner, "Buy milk", None, false)
            .await
            .unwrap();

        assert!(tasks_for_owner(&pool, other).await.unwrap().is_empty());
        assert!(find_task(&pool, other, created.id).await.unwrap().is_none());
    }

    #[sqlx::test]
    async fn test_foreign_update_is_not_found_and_has_no_effect(pool: PgPool) {
        let owner = seed_user(&pool, "owner@example.com").await;
        let other = seed_user(&pool, "other@example.com").await;

        let created = create_task(&pool, owner, "Buy milk", None, false)
            .await
            .unwrap();

        let res = update_task(
            &pool,
            other,
            created.id,
            Some("Hijacked".to_string()),
            None,
            Some(true),
        )
        .await
        .unwrap();
        assert!(res.is_none());

        let untouched = find_task(&pool, owner, created.id).await.unwrap().unwrap();
        assert_eq!(untouched.title, "Buy milk");
        assert!(!untouched.complete);
    }

    #[sqlx::test]
    async fn test_foreign_delete_is_not_found_and_keeps_row(pool: PgPool) {
        let owner = seed_user(&pool, "owner@example.com").await;
        let other = seed_user(&pool, "other@example.com").await;

        let created = create_task(&pool, owner, "Buy milk", None, false)
            .await
            .unwrap();

        assert!(!delete_task(&pool, other, created.id).await.unwrap());
        assert!(find_task(&pool, owner, created.id).await.unwrap().is_some());
    }

    #[sqlx::test]
    async fn test_owner_update_and_delete_succeed(pool: PgPool) {
        let owner = seed_user(&pool, "owner@example.com").await;

        let created = create_task(&pool, owner, "Buy milk", None, false)
            .await
            .unwrap();

        let updated = update_task(&pool, owner, created.id, None, None, Some(true))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.complete);
        assert_eq!(updated.title, "Buy milk");

        assert!(delete_task(&pool, owner, created.id).await.unwrap());
        assert!(find_task(&pool, owner, created.id).await.unwrap().is_none());
    }
}
