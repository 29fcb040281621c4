use sqlx::PgPool;
use uuid::Uuid;

use crate::meals::repo_types::{FoodItem, Meal, NewFoodItem};

impl Meal {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, week_id, name, created_at
            FROM meals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(meal)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, week_id, name, created_at
            FROM meals
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_week(db: &PgPool, week_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, week_id, name, created_at
            FROM meals
            WHERE week_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(week_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Inserts the meal and its food items in one transaction.
    pub async fn create_with_items(
        db: &PgPool,
        week_id: Uuid,
        name: &str,
        items: &[NewFoodItem],
    ) -> anyhow::Result<(Meal, Vec<FoodItem>)> {
        let mut tx = db.begin().await?;

        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (week_id, name)
            VALUES ($1, $2)
            RETURNING id, week_id, name, created_at
            "#,
        )
        .bind(week_id)
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, FoodItem>(
                r#"
                INSERT INTO food_items (meal_id, name, description)
                VALUES ($1, $2, $3)
                RETURNING id, meal_id, name, description, created_at
                "#,
            )
            .bind(meal.id)
            .bind(&item.name)
            .bind(&item.description)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok((meal, created))
    }

    /// Full replace: the meal row and its whole food-item set, in one
    /// transaction. Returns None when the meal does not exist.
    pub async fn update_with_items(
        db: &PgPool,
        id: Uuid,
        week_id: Uuid,
        name: &str,
        items: &[NewFoodItem],
    ) -> anyhow::Result<Option<(Meal, Vec<FoodItem>)>> {
        let mut tx = db.begin().await?;

        let meal = sqlx::query_as::<_, Meal>(
            r#"
            UPDATE meals
            SET week_id = $2, name = $3
            WHERE id = $1
            RETURNING id, week_id, name, created_at
            "#,
        )
        .bind(id)
        .bind(week_id)
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(meal) = meal else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM food_items WHERE meal_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, FoodItem>(
                r#"
                INSERT INTO food_items (meal_id, name, description)
                VALUES ($1, $2, $3)
                RETURNING id, meal_id, name, description, created_at
                "#,
            )
            .bind(meal.id)
            .bind(&item.name)
            .bind(&item.description)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(Some((meal, created)))
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM meals WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
        Ok(found)
    }
}

impl FoodItem {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<FoodItem>> {
        let item = sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT id, meal_id, name, description, created_at
            FROM food_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    pub async fn list_by_meal(db: &PgPool, meal_id: Uuid) -> anyhow::Result<Vec<FoodItem>> {
        let rows = sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT id, meal_id, name, description, created_at
            FROM food_items
            WHERE meal_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(meal_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        meal_id: Uuid,
        name: &str,
        description: &str,
    ) -> anyhow::Result<FoodItem> {
        let item = sqlx::query_as::<_, FoodItem>(
            r#"
            INSERT INTO food_items (meal_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, meal_id, name, description, created_at
            "#,
        )
        .bind(meal_id)
        .bind(name)
        .bind(description)
        .fetch_one(db)
        .await?;
        Ok(item)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        meal_id: Uuid,
        name: &str,
        description: &str,
    ) -> anyhow::Result<Option<FoodItem>> {
        let item = sqlx::query_as::<_, FoodItem>(
            r#"
            UPDATE food_items
            SET meal_id = $2, name = $3, description = $4
            WHERE id = $1
            RETURNING id, meal_id, name, description, created_at
            "#,
        )
        .bind(id)
        .bind(meal_id)
        .bind(name)
        .bind(description)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM food_items WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
