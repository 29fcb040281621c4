use sqlx::PgPool;
use uuid::Uuid;

use crate::nutritionists::repo_types::Nutritionist;

impl Nutritionist {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Nutritionist>> {
        let nutritionist = sqlx::query_as::<_, Nutritionist>(
            r#"
            SELECT id, name, email, password_hash, crn, created_at
            FROM nutritionists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(nutritionist)
    }

    /// Find a nutritionist by email, used by login.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Nutritionist>> {
        let nutritionist = sqlx::query_as::<_, Nutritionist>(
            r#"
            SELECT id, name, email, password_hash, crn, created_at
            FROM nutritionists
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(nutritionist)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Nutritionist>> {
        let rows = sqlx::query_as::<_, Nutritionist>(
            r#"
            SELECT id, name, email, password_hash, crn, created_at
            FROM nutritionists
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let found: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM nutritionists WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;
        Ok(found)
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        crn: &str,
    ) -> anyhow::Result<Nutritionist> {
        let nutritionist = sqlx::query_as::<_, Nutritionist>(
            r#"
            INSERT INTO nutritionists (name, email, password_hash, crn)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, crn, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(crn)
        .fetch_one(db)
        .await?;
        Ok(nutritionist)
    }

    /// Full replace of the mapped fields; the password hash only changes
    /// when a new one was supplied.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        email: &str,
        password_hash: Option<&str>,
        crn: &str,
    ) -> anyhow::Result<Option<Nutritionist>> {
        let nutritionist = sqlx::query_as::<_, Nutritionist>(
            r#"
            UPDATE nutritionists
            SET name = $2, email = $3, password_hash = COALESCE($4, password_hash), crn = $5
            WHERE id = $1
            RETURNING id, name, email, password_hash, crn, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(crn)
        .fetch_optional(db)
        .await?;
        Ok(nutritionist)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM nutritionists WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
