//! Secondary store synchronization.
//!
//! The primary relational store is authoritative; each secondary store
//! (profile cache, search index) is kept in step through a strategy
//! implementing [`SecondaryStoreSync`]. Strategies are best-effort: the
//! write coordinator never rolls back a committed primary write because a
//! secondary store failed.

use async_trait::async_trait;
use common::AppError;
use domain::UserProjection;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use uuid::Uuid;

pub mod profile_store;
pub mod search_index;

pub use profile_store::ProfileStoreSync;
pub use search_index::SearchIndexSync;

/// Per-target synchronization strategy. Every operation must be idempotent;
/// the coordinator may replay an upsert after a partial failure.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SecondaryStoreSync: Send + Sync {
    /// Human-readable target name, used in logs.
    fn name(&self) -> &'static str;

    /// Create or refresh this store's record for the given projection.
    /// `None` extended attributes leave any previously stored values alone.
    async fn upsert(&self, projection: &UserProjection) -> Result<(), AppError>;

    /// Drop this store's record for the given user, if present.
    async fn remove(&self, user_id: Uuid) -> Result<(), AppError>;

    /// Upsert a batch of projections. Returns the number applied.
    async fn bulk_upsert(&self, projections: &[UserProjection]) -> Result<usize, AppError>;

    /// Replace this store's full contents with the given projections.
    /// Returns the number of records after reconciliation.
    async fn reconcile_all(&self, projections: &[UserProjection]) -> Result<usize, AppError>;
}
