//! Profile store synchronization backed by Redis JSON documents.

use async_trait::async_trait;
use common::AppError;
use domain::UserProjection;
use redis::{aio::ConnectionManager, AsyncCommands};
use uuid::Uuid;

use crate::sync::SecondaryStoreSync;

const PROFILE_KEY_PREFIX: &str = "profile:";

/// Mirrors user profiles into Redis as JSON documents keyed `profile:{id}`.
#[derive(Clone)]
pub struct ProfileStoreSync {
    connection: ConnectionManager,
}

impl ProfileStoreSync {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::secondary_store(format!("invalid redis url: {e}")))?;
        let connection = ConnectionManager::new(client).await?;
        tracing::info!("Profile store connected");
        Ok(Self { connection })
    }

    pub fn from_connection(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    fn key(user_id: Uuid) -> String {
        format!("{PROFILE_KEY_PREFIX}{user_id}")
    }

    async fn read_existing(&self, user_id: Uuid) -> Result<Option<UserProjection>, AppError> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(Self::key(user_id)).await?;
        match raw {
            Some(json) => {
                // A corrupt document is replaced rather than merged.
                match serde_json::from_str(&json) {
                    Ok(doc) => Ok(Some(doc)),
                    Err(e) => {
                        tracing::warn!(user_id = %user_id, error = %e, "Discarding unparseable profile document");
                        Ok(None)
                    }
                }
            }
            None => Ok(None),
        }
    }

    async fn write(&self, doc: &UserProjection) -> Result<(), AppError> {
        let json = serde_json::to_string(doc)
            .map_err(|e| AppError::secondary_store(format!("profile serialization: {e}")))?;
        let mut conn = self.connection.clone();
        let _: () = conn.set(Self::key(doc.id), json).await?;
        Ok(())
    }
}

#[async_trait]
impl SecondaryStoreSync for ProfileStoreSync {
    fn name(&self) -> &'static str {
        "profile-store"
    }

    async fn upsert(&self, projection: &UserProjection) -> Result<(), AppError> {
        let merged = match self.read_existing(projection.id).await? {
            Some(existing) => existing.merged_with(projection),
            None => projection.clone(),
        };
        self.write(&merged).await
    }

    async fn remove(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(Self::key(user_id)).await?;
        Ok(())
    }

    async fn bulk_upsert(&self, projections: &[UserProjection]) -> Result<usize, AppError> {
        for projection in projections {
            self.upsert(projection).await?;
        }
        Ok(projections.len())
    }

    async fn reconcile_all(&self, projections: &[UserProjection]) -> Result<usize, AppError> {
        let mut conn = self.connection.clone();
        let stale: Vec<String> = conn.keys(format!("{PROFILE_KEY_PREFIX}*")).await?;
        if !stale.is_empty() {
            let _: () = conn.del(stale).await?;
        }
        for projection in projections {
            self.write(projection).await?;
        }
        Ok(projections.len())
    }
}
