//! Login, token validation and logout.

use std::sync::Arc;

use async_trait::async_trait;
use common::{AppError, AppResult};
use domain::{Password, TOKEN_TYPE_BEARER};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use serde::Serialize;

use crate::cache::SessionCache;
use crate::directory::UserDirectory;
use crate::token::{Claims, TokenCodec};

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

/// Authentication entry points for the request layer.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Authenticate and open a session. Every failure mode surfaces as
    /// [`AppError::InvalidCredentials`].
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse>;

    /// Check a presented token against the session cache, then its
    /// signature. Returns the claims of a live, intact token.
    async fn validate(&self, token: &str) -> AppResult<Claims>;

    /// Revoke the session for the token. Idempotent.
    async fn logout(&self, token: &str) -> AppResult<()>;
}

/// Concrete gate combining the user directory, the token codec and the
/// session cache.
pub struct Authenticator {
    directory: Arc<dyn UserDirectory>,
    codec: Arc<dyn TokenCodec>,
    cache: Arc<dyn SessionCache>,
}

impl Authenticator {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        codec: Arc<dyn TokenCodec>,
        cache: Arc<dyn SessionCache>,
    ) -> Self {
        Self {
            directory,
            codec,
            cache,
        }
    }
}

#[async_trait]
impl AuthGate for Authenticator {
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let lookup = self.directory.find_active_by_username(username).await?;

        // Verification runs even when the user is missing so response
        // timing cannot enumerate valid usernames.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";
        let password_hash = lookup
            .as_ref()
            .map(|found| found.user.password_hash.as_str())
            .unwrap_or(dummy_hash);

        let password_valid = Password::from_hash(password_hash).verify(password);

        let Some(found) = lookup.filter(|_| password_valid) else {
            return Err(AppError::InvalidCredentials);
        };

        let issued = self.codec.issue(&found.user, &found.roles)?;
        self.cache
            .put(&issued.token, found.user.id, issued.ttl_millis())
            .await?;
        tracing::info!(user_id = %found.user.id, "Session opened");

        Ok(TokenResponse {
            access_token: issued.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: issued.claims.exp - issued.claims.iat,
        })
    }

    async fn validate(&self, token: &str) -> AppResult<Claims> {
        // Session check first: a revoked or expired session short-circuits
        // before any signature work. Cache transport errors propagate, so
        // an unreachable cache fails closed.
        if !self.cache.exists(token).await? {
            return Err(AppError::InvalidCredentials);
        }

        self.codec
            .verify(token)
            .map_err(|_| AppError::InvalidCredentials)
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        self.cache.revoke(token).await
    }
}
