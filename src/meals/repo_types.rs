use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Meal record in the database. Ex: "Café da Manhã", "Almoço".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub week_id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// Food item record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

/// A food item to insert alongside its meal.
#[derive(Debug, Clone)]
pub struct NewFoodItem {
    pub name: String,
    pub description: String,
}
