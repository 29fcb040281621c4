use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::auth::claims::{ActorKind, Claims};
use crate::config::JwtConfig;
use crate::state::AppState;

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, id: Uuid, email: &str, kind: ActorKind) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: id,
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            kind,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(id = %id, kind = ?kind, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!(id = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_user_token() {
        let keys = make_keys();
        let id = Uuid::new_v4();
        let token = keys.sign(id, "user@example.com", ActorKind::User).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.kind, ActorKind::User);
    }

    #[tokio::test]
    async fn sign_preserves_nutritionist_kind() {
        let keys = make_keys();
        let token = keys
            .sign(Uuid::new_v4(), "dr@example.com", ActorKind::Nutritionist)
            .expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.kind, ActorKind::Nutritionist);
    }

    #[tokio::test]
    async fn token_expires_after_configured_ttl() {
        let keys = make_keys();
        let token = keys
            .sign(Uuid::new_v4(), "user@example.com", ActorKind::User)
            .expect("sign");
        let claims = keys.verify(&token).expect("verify");
        // fake state configures 180 minutes
        assert_eq!(claims.exp - claims.iat, 180 * 60);
    }

    #[tokio::test]
    async fn verify_rejects_token_signed_with_other_secret() {
        let keys = make_keys();
        let other = JwtKeys {
            encoding: EncodingKey::from_secret(b"other-secret"),
            decoding: DecodingKey::from_secret(b"other-secret"),
            ttl: Duration::from_secs(60),
        };
        let token = other
            .sign(Uuid::new_v4(), "user@example.com", ActorKind::User)
            .expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_garbage() {
        let keys = make_keys();
        assert!(keys.verify("not.a.token").is_err());
    }
}
