use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user and nutritionist login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub id: Uuid,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_serialization() {
        let response = LoginResponse {
            token: "abc.def.ghi".into(),
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("abc.def.ghi"));
        assert!(json.contains("user@example.com"));
    }
}
