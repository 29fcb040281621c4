use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Nutritionist record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Nutritionist {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub crn: String, // professional license code
    pub created_at: OffsetDateTime,
}
