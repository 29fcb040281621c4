use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Diet record in the database. The meal plan hangs off it through weeks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Diet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// One week of a diet's meal plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Week {
    pub id: Uuid,
    pub diet_id: Uuid,
    pub week_number: i32,
    pub created_at: OffsetDateTime,
}
