//! Lifecycle event publishing seam.
//!
//! Downstream consumers (welcome mail, audit) subscribe outside this
//! service; publishing is fire-and-forget and never influences the write
//! path outcome.

use async_trait::async_trait;
use domain::UserEvent;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserEventPublisher: Send + Sync {
    async fn publish(&self, event: &UserEvent);
}

/// Emits lifecycle events through the log stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventPublisher;

#[async_trait]
impl UserEventPublisher for LogEventPublisher {
    async fn publish(&self, event: &UserEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => {
                tracing::info!(kind = ?event.kind, user_id = %event.user_id, payload, "User event")
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize user event"),
        }
    }
}
