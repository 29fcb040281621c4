use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::User;

impl User {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, nutritionist_id, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, nutritionist_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, nutritionist_id, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
        Ok(found)
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        nutritionist_id: Uuid,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, nutritionist_id)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, nutritionist_id, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(nutritionist_id)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Full replace of the mapped fields; the password hash only changes
    /// when a new one was supplied.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        email: &str,
        password_hash: Option<&str>,
        nutritionist_id: Uuid,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, password_hash = COALESCE($3, password_hash), nutritionist_id = $4
            WHERE id = $1
            RETURNING id, email, password_hash, nutritionist_id, created_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(nutritionist_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Deletes the user; the health profile, diets, weeks, meals and food
    /// items go with it through the store-level cascades.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
