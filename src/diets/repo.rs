use sqlx::PgPool;
use uuid::Uuid;

use crate::diets::repo_types::{Diet, Week};

impl Diet {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Diet>> {
        let diet = sqlx::query_as::<_, Diet>(
            r#"
            SELECT id, user_id, created_at
            FROM diets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(diet)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Diet>> {
        let rows = sqlx::query_as::<_, Diet>(
            r#"
            SELECT id, user_id, created_at
            FROM diets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Diet>> {
        let rows = sqlx::query_as::<_, Diet>(
            r#"
            SELECT id, user_id, created_at
            FROM diets
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM diets WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
        Ok(found)
    }

    pub async fn create(db: &PgPool, user_id: Uuid) -> anyhow::Result<Diet> {
        let diet = sqlx::query_as::<_, Diet>(
            r#"
            INSERT INTO diets (user_id)
            VALUES ($1)
            RETURNING id, user_id, created_at
            "#,
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(diet)
    }

    /// Reassigns the diet to another user.
    pub async fn update(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<Option<Diet>> {
        let diet = sqlx::query_as::<_, Diet>(
            r#"
            UPDATE diets
            SET user_id = $2
            WHERE id = $1
            RETURNING id, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(diet)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM diets WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl Week {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Week>> {
        let week = sqlx::query_as::<_, Week>(
            r#"
            SELECT id, diet_id, week_number, created_at
            FROM weeks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(week)
    }

    pub async fn list_by_diet(db: &PgPool, diet_id: Uuid) -> anyhow::Result<Vec<Week>> {
        let rows = sqlx::query_as::<_, Week>(
            r#"
            SELECT id, diet_id, week_number, created_at
            FROM weeks
            WHERE diet_id = $1
            ORDER BY week_number ASC
            "#,
        )
        .bind(diet_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM weeks WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
        Ok(found)
    }

    pub async fn create(db: &PgPool, diet_id: Uuid, week_number: i32) -> anyhow::Result<Week> {
        let week = sqlx::query_as::<_, Week>(
            r#"
            INSERT INTO weeks (diet_id, week_number)
            VALUES ($1, $2)
            RETURNING id, diet_id, week_number, created_at
            "#,
        )
        .bind(diet_id)
        .bind(week_number)
        .fetch_one(db)
        .await?;
        Ok(week)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        diet_id: Uuid,
        week_number: i32,
    ) -> anyhow::Result<Option<Week>> {
        let week = sqlx::query_as::<_, Week>(
            r#"
            UPDATE weeks
            SET diet_id = $2, week_number = $3
            WHERE id = $1
            RETURNING id, diet_id, week_number, created_at
            "#,
        )
        .bind(id)
        .bind(diet_id)
        .bind(week_number)
        .fetch_optional(db)
        .await?;
        Ok(week)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM weeks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
