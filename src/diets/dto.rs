use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::diets::repo_types::{Diet, Week};
use crate::meals::dto::MealDto;

#[derive(Debug, Serialize)]
pub struct DietDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl From<Diet> for DietDto {
    fn from(d: Diet) -> Self {
        Self {
            id: d.id,
            user_id: d.user_id,
            created_at: d.created_at,
        }
    }
}

/// A week with its meals, nested inside a diet read.
#[derive(Debug, Serialize)]
pub struct WeekDto {
    pub id: Uuid,
    pub diet_id: Uuid,
    pub week_number: i32,
    pub created_at: OffsetDateTime,
    pub meals: Vec<MealDto>,
}

impl WeekDto {
    pub fn from_parts(week: Week, meals: Vec<MealDto>) -> Self {
        Self {
            id: week.id,
            diet_id: week.diet_id,
            week_number: week.week_number,
            created_at: week.created_at,
            meals,
        }
    }
}

/// The full meal plan: diet → weeks → meals → food items.
#[derive(Debug, Serialize)]
pub struct DietDetailsDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub weeks: Vec<WeekDto>,
}

impl DietDetailsDto {
    pub fn from_parts(diet: Diet, weeks: Vec<WeekDto>) -> Self {
        Self {
            id: diet.id,
            user_id: diet.user_id,
            created_at: diet.created_at,
            weeks,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDietRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDietRequest {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateWeekRequest {
    pub diet_id: Uuid,
    pub week_number: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWeekRequest {
    pub id: Uuid,
    pub diet_id: Uuid,
    pub week_number: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diet_details_nest_weeks_in_order() {
        let diet = Diet {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let weeks = (1..=3)
            .map(|n| {
                WeekDto::from_parts(
                    Week {
                        id: Uuid::new_v4(),
                        diet_id: diet.id,
                        week_number: n,
                        created_at: OffsetDateTime::UNIX_EPOCH,
                    },
                    Vec::new(),
                )
            })
            .collect();

        let dto = DietDetailsDto::from_parts(diet.clone(), weeks);
        assert_eq!(dto.id, diet.id);
        assert_eq!(dto.weeks.len(), 3);
        assert_eq!(
            dto.weeks.iter().map(|w| w.week_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
