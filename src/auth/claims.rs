use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which login surface issued the token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    User,
    Nutritionist,
}

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,       // actor ID
    pub email: String,   // actor email
    pub iat: usize,      // issued at (unix timestamp)
    pub exp: usize,      // expires at (unix timestamp)
    pub kind: ActorKind, // user or nutritionist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ActorKind::Nutritionist).unwrap(),
            r#""nutritionist""#
        );
        assert_eq!(serde_json::to_string(&ActorKind::User).unwrap(), r#""user""#);
    }

    #[test]
    fn claims_roundtrip() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "user@example.com".into(),
            iat: 1_700_000_000,
            exp: 1_700_010_800,
            kind: ActorKind::User,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub, claims.sub);
        assert_eq!(back.email, claims.email);
        assert_eq!(back.exp, claims.exp);
        assert_eq!(back.kind, ActorKind::User);
    }
}
