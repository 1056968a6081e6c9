//! JWT encoding and verification.

use chrono::{Duration, Utc};
use common::AppResult;
use domain::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    /// Unique token id; makes two tokens issued within the same second
    /// distinguishable, so revoking one never affects the other.
    pub jti: Uuid,
}

/// A freshly signed token with its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    /// Token lifetime in milliseconds; used as the session entry TTL.
    pub fn ttl_millis(&self) -> u64 {
        (self.claims.exp - self.claims.iat).max(0) as u64 * 1000
    }
}

/// Signs and verifies tokens. Verification here checks the signature and
/// expiry only; session liveness is the cache's concern.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenCodec: Send + Sync {
    fn issue(&self, user: &User, roles: &[String]) -> AppResult<IssuedToken>;

    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 implementation of [`TokenCodec`].
pub struct JwtCodec {
    secret: String,
    expiration_hours: i64,
}

impl JwtCodec {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret,
            expiration_hours,
        }
    }

    /// Build from the environment-loaded JWT configuration.
    pub fn from_config(config: &common::JwtConfig) -> Self {
        Self::new(config.secret.clone(), config.expiration_hours)
    }

    fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, user: &User, roles: &[String]) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )?;

        Ok(IssuedToken { token, claims })
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn codec() -> JwtCodec {
        JwtCodec::new("test-secret-at-least-32-bytes-long!!".into(), 24)
    }

    #[test]
    fn issued_token_round_trips() {
        let u = user();
        let issued = codec().issue(&u, &["user".into()]).unwrap();

        let claims = codec().verify(&issued.token).unwrap();
        assert_eq!(claims.sub, u.id);
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.roles, vec!["user".to_string()]);
        assert_eq!(issued.ttl_millis(), 24 * 60 * 60 * 1000);
    }

    #[test]
    fn two_issuances_carry_distinct_token_ids() {
        let u = user();
        let c = codec();
        let first = c.issue(&u, &[]).unwrap();
        let second = c.issue(&u, &[]).unwrap();
        assert_ne!(first.claims.jti, second.claims.jti);
        assert_ne!(first.token, second.token);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let issued = codec().issue(&user(), &[]).unwrap();
        let mut tampered = issued.token.clone();
        tampered.pop();
        tampered.push('x');
        assert!(codec().verify(&tampered).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issued = codec().issue(&user(), &[]).unwrap();
        let other = JwtCodec::new("a-completely-different-secret-value!".into(), 24);
        assert!(other.verify(&issued.token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // jsonwebtoken applies 60s leeway, so expire well in the past.
        let stale = JwtCodec::new("test-secret-at-least-32-bytes-long!!".into(), -2);
        let issued = stale.issue(&user(), &[]).unwrap();
        assert!(codec().verify(&issued.token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(codec().verify("not-a-jwt").is_err());
    }

    #[test]
    fn config_built_codec_verifies_its_own_tokens() {
        let config = common::JwtConfig {
            secret: "test-secret-at-least-32-bytes-long!!".into(),
            expiration_hours: 1,
        };
        let codec = JwtCodec::from_config(&config);
        let issued = codec.issue(&user(), &[]).unwrap();
        assert_eq!(issued.ttl_millis(), 60 * 60 * 1000);
        assert!(codec.verify(&issued.token).is_ok());
    }
}
