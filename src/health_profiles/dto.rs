use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::health_profiles::repo_types::HealthProfile;

#[derive(Debug, Serialize)]
pub struct HealthProfileDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    pub comments: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<HealthProfile> for HealthProfileDto {
    fn from(p: HealthProfile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            age: p.age,
            height: p.height,
            weight: p.weight,
            comments: p.comments,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateHealthProfileRequest {
    pub user_id: Uuid,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    pub comments: Option<String>,
}

/// The owning user is fixed after creation; updates replace the measured
/// fields only.
#[derive(Debug, Deserialize)]
pub struct UpdateHealthProfileRequest {
    pub id: Uuid,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_mirrors_row() {
        let row = HealthProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            age: 34,
            height: 172.5,
            weight: 68.2,
            comments: Some("lactose intolerant".into()),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let dto = HealthProfileDto::from(row.clone());
        assert_eq!(dto.id, row.id);
        assert_eq!(dto.user_id, row.user_id);
        assert_eq!(dto.age, 34);
        assert_eq!(dto.height, 172.5);
        assert_eq!(dto.comments.as_deref(), Some("lactose intolerant"));
    }
}
