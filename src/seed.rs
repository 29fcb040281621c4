use anyhow::Context;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password;

const DEMO_MEALS: [&str; 5] = [
    "Café da Manhã",
    "Lanche",
    "Almoço",
    "Lanche da Tarde",
    "Jantar",
];

const DEMO_FOOD_ITEMS: [(&str, &str); 2] = [("Pão", "2 fatias"), ("Leite", "1 copo")];

/// Inserts one demo nutritionist, user, diet and meal plan on first run.
/// A database that already has nutritionists is left untouched.
pub async fn run(db: &PgPool) -> anyhow::Result<()> {
    let nutritionists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nutritionists")
        .fetch_one(db)
        .await?;
    if nutritionists > 0 {
        return Ok(());
    }

    let nutritionist_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO nutritionists (name, email, password_hash, crn)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind("Dr. John Doe")
    .bind("john.doe@example.com")
    .bind(password::hash_password("12345").context("hash demo nutritionist password")?)
    .bind("CRN123456")
    .fetch_one(db)
    .await?;

    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, password_hash, nutritionist_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind("user@example.com")
    .bind(password::hash_password("user123").context("hash demo user password")?)
    .bind(nutritionist_id)
    .fetch_one(db)
    .await?;

    let diet_id: Uuid = sqlx::query_scalar("INSERT INTO diets (user_id) VALUES ($1) RETURNING id")
        .bind(user_id)
        .fetch_one(db)
        .await?;

    let week_id: Uuid =
        sqlx::query_scalar("INSERT INTO weeks (diet_id, week_number) VALUES ($1, 1) RETURNING id")
            .bind(diet_id)
            .fetch_one(db)
            .await?;

    for meal_name in DEMO_MEALS {
        let meal_id: Uuid =
            sqlx::query_scalar("INSERT INTO meals (week_id, name) VALUES ($1, $2) RETURNING id")
                .bind(week_id)
                .bind(meal_name)
                .fetch_one(db)
                .await?;

        for (name, description) in DEMO_FOOD_ITEMS {
            sqlx::query("INSERT INTO food_items (meal_id, name, description) VALUES ($1, $2, $3)")
                .bind(meal_id)
                .bind(name)
                .bind(description)
                .execute(db)
                .await?;
        }
    }

    info!(%nutritionist_id, %user_id, %diet_id, "seeded demo data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_plan_covers_a_full_day() {
        assert_eq!(DEMO_MEALS.len(), 5);
        assert_eq!(DEMO_FOOD_ITEMS.len(), 2);
    }
}
