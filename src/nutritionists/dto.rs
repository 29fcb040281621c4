use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutritionists::repo_types::Nutritionist;

/// Wire shape of a nutritionist. The password hash never leaves the service.
#[derive(Debug, Serialize)]
pub struct NutritionistDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub crn: String,
    pub created_at: OffsetDateTime,
}

impl From<Nutritionist> for NutritionistDto {
    fn from(n: Nutritionist) -> Self {
        Self {
            id: n.id,
            name: n.name,
            email: n.email,
            crn: n.crn,
            created_at: n.created_at,
        }
    }
}

/// Request body for nutritionist registration.
#[derive(Debug, Deserialize)]
pub struct CreateNutritionistRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub crn: String,
}

/// Request body for a full update. `password` only replaces the stored
/// hash when present.
#[derive(Debug, Deserialize)]
pub struct UpdateNutritionistRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub crn: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_carries_no_password_hash() {
        let dto = NutritionistDto::from(Nutritionist {
            id: Uuid::new_v4(),
            name: "Dr. John Doe".into(),
            email: "john.doe@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            crn: "CRN123456".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        });
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("CRN123456"));
        assert!(!json.contains("argon2id"));
    }
}
