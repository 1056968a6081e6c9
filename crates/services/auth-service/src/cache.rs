//! Redis-backed token session cache.
//!
//! One entry per live token under `"jwt:" + token`, expiring with the
//! token itself. Logout deletes the entry; validation treats a missing
//! entry as a dead session.

use async_trait::async_trait;
use common::AppResult;
use domain::SESSION_KEY_PREFIX;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use redis::{aio::ConnectionManager, AsyncCommands};
use uuid::Uuid;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Register a live session for the token with a millisecond TTL.
    async fn put(&self, token: &str, subject: Uuid, ttl_ms: u64) -> AppResult<()>;

    /// Whether a live session exists for the token.
    async fn exists(&self, token: &str) -> AppResult<bool>;

    /// Drop the session for the token, if any.
    async fn revoke(&self, token: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct RedisSessionCache {
    connection: ConnectionManager,
}

impl RedisSessionCache {
    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(common::AppError::Cache)?;
        let connection = ConnectionManager::new(client).await?;
        tracing::info!("Session cache connected");
        Ok(Self { connection })
    }

    pub fn from_connection(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    fn key(token: &str) -> String {
        format!("{SESSION_KEY_PREFIX}{token}")
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn put(&self, token: &str, subject: Uuid, ttl_ms: u64) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn
            .pset_ex(Self::key(token), subject.to_string(), ttl_ms)
            .await?;
        Ok(())
    }

    async fn exists(&self, token: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(Self::key(token)).await?;
        Ok(exists)
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(Self::key(token)).await?;
        Ok(())
    }
}
