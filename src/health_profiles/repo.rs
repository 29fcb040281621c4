use sqlx::PgPool;
use uuid::Uuid;

use crate::health_profiles::repo_types::HealthProfile;

impl HealthProfile {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<HealthProfile>> {
        let profile = sqlx::query_as::<_, HealthProfile>(
            r#"
            SELECT id, user_id, age, height, weight, comments, created_at
            FROM health_profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    /// The user's profile, if one exists. The unique index guarantees at
    /// most one row.
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<HealthProfile>> {
        let profile = sqlx::query_as::<_, HealthProfile>(
            r#"
            SELECT id, user_id, age, height, weight, comments, created_at
            FROM health_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<HealthProfile>> {
        let rows = sqlx::query_as::<_, HealthProfile>(
            r#"
            SELECT id, user_id, age, height, weight, comments, created_at
            FROM health_profiles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        age: i32,
        height: f64,
        weight: f64,
        comments: Option<&str>,
    ) -> anyhow::Result<HealthProfile> {
        let profile = sqlx::query_as::<_, HealthProfile>(
            r#"
            INSERT INTO health_profiles (user_id, age, height, weight, comments)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, age, height, weight, comments, created_at
            "#,
        )
        .bind(user_id)
        .bind(age)
        .bind(height)
        .bind(weight)
        .bind(comments)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        age: i32,
        height: f64,
        weight: f64,
        comments: Option<&str>,
    ) -> anyhow::Result<Option<HealthProfile>> {
        let profile = sqlx::query_as::<_, HealthProfile>(
            r#"
            UPDATE health_profiles
            SET age = $2, height = $3, weight = $4, comments = $5
            WHERE id = $1
            RETURNING id, user_id, age, height, weight, comments, created_at
            "#,
        )
        .bind(id)
        .bind(age)
        .bind(height)
        .bind(weight)
        .bind(comments)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM health_profiles WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
