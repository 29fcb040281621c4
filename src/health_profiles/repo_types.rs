use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Health profile record in the database. At most one per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HealthProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub age: i32,
    pub height: f64, // cm
    pub weight: f64, // kg
    pub comments: Option<String>,
    pub created_at: OffsetDateTime,
}
