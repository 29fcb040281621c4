use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::User;

/// Wire shape of a user. The password hash never leaves the service.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub nutritionist_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            nutritionist_id: u.nutritionist_id,
            created_at: u.created_at,
        }
    }
}

/// Request body for user creation (performed by a nutritionist).
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub nutritionist_id: Uuid,
}

/// Request body for a full update. `password` only replaces the stored
/// hash when present.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub id: Uuid,
    pub email: String,
    pub password: Option<String>,
    pub nutritionist_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_carries_no_password_hash() {
        let dto = UserDto::from(User {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            nutritionist_id: Uuid::new_v4(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        });
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("user@example.com"));
        assert!(!json.contains("argon2id"));
    }
}
