use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::repo_types::{FoodItem, Meal, NewFoodItem};

#[derive(Debug, Serialize)]
pub struct FoodItemDto {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

impl From<FoodItem> for FoodItemDto {
    fn from(i: FoodItem) -> Self {
        Self {
            id: i.id,
            meal_id: i.meal_id,
            name: i.name,
            description: i.description,
            created_at: i.created_at,
        }
    }
}

/// Wire shape of a meal with its food items.
#[derive(Debug, Serialize)]
pub struct MealDto {
    pub id: Uuid,
    pub week_id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub food_items: Vec<FoodItemDto>,
}

impl MealDto {
    pub fn from_parts(meal: Meal, items: Vec<FoodItem>) -> Self {
        Self {
            id: meal.id,
            week_id: meal.week_id,
            name: meal.name,
            created_at: meal.created_at,
            food_items: items.into_iter().map(FoodItemDto::from).collect(),
        }
    }
}

/// A food item nested inside a meal create/update body.
#[derive(Debug, Deserialize)]
pub struct FoodItemInput {
    pub name: String,
    pub description: String,
}

impl From<FoodItemInput> for NewFoodItem {
    fn from(i: FoodItemInput) -> Self {
        Self {
            name: i.name,
            description: i.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub week_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub food_items: Vec<FoodItemInput>,
}

/// Full replace of the meal and its food-item set.
#[derive(Debug, Deserialize)]
pub struct UpdateMealRequest {
    pub id: Uuid,
    pub week_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub food_items: Vec<FoodItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFoodItemRequest {
    pub meal_id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFoodItemRequest {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_dto_nests_its_items() {
        let meal = Meal {
            id: Uuid::new_v4(),
            week_id: Uuid::new_v4(),
            name: "Almoço".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let items = vec![
            FoodItem {
                id: Uuid::new_v4(),
                meal_id: meal.id,
                name: "Pão".into(),
                description: "2 fatias".into(),
                created_at: OffsetDateTime::UNIX_EPOCH,
            },
            FoodItem {
                id: Uuid::new_v4(),
                meal_id: meal.id,
                name: "Leite".into(),
                description: "1 copo".into(),
                created_at: OffsetDateTime::UNIX_EPOCH,
            },
        ];

        let dto = MealDto::from_parts(meal.clone(), items);
        assert_eq!(dto.id, meal.id);
        assert_eq!(dto.food_items.len(), 2);
        assert!(dto.food_items.iter().all(|i| i.meal_id == meal.id));

        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("Almoço"));
        assert!(json.contains("2 fatias"));
    }

    #[test]
    fn create_request_defaults_to_no_items() {
        let body = r#"{"week_id":"11111111-2222-3333-4444-555555555555","name":"Jantar"}"#;
        let req: CreateMealRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.name, "Jantar");
        assert!(req.food_items.is_empty());
    }
}
