//! Fork/join bulk user creation.

use std::sync::Arc;

use domain::constants::BULK_CHUNK_THRESHOLD;
use domain::CreateUserRequest;
use futures::future::BoxFuture;
use futures::FutureExt;
use uuid::Uuid;

use crate::service::coordinator::UserWriteCoordinator;

/// Per-request outcome of a bulk creation. `index` always refers to the
/// position in the original request list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    Created { index: usize, id: Uuid },
    Failed { index: usize, reason: String },
}

impl BulkOutcome {
    pub fn index(&self) -> usize {
        match self {
            BulkOutcome::Created { index, .. } | BulkOutcome::Failed { index, .. } => *index,
        }
    }
}

/// Splits a batch into halves recursively, spawning the left half onto the
/// runtime and computing the right half in place, until chunks are small
/// enough to process sequentially. One bad request never aborts its chunk.
pub struct BulkCreationScheduler {
    coordinator: Arc<dyn UserWriteCoordinator>,
}

impl BulkCreationScheduler {
    pub fn new(coordinator: Arc<dyn UserWriteCoordinator>) -> Self {
        Self { coordinator }
    }

    pub async fn create_many(&self, requests: Vec<CreateUserRequest>) -> Vec<BulkOutcome> {
        let total = requests.len();
        if total == 0 {
            return Vec::new();
        }
        let requests = Arc::new(requests);
        let outcomes = split_and_create(self.coordinator.clone(), requests, 0, total).await;
        debug_assert_eq!(outcomes.len(), total);
        outcomes
    }
}

fn split_and_create(
    coordinator: Arc<dyn UserWriteCoordinator>,
    requests: Arc<Vec<CreateUserRequest>>,
    start: usize,
    end: usize,
) -> BoxFuture<'static, Vec<BulkOutcome>> {
    async move {
        if end - start <= BULK_CHUNK_THRESHOLD {
            let mut outcomes = Vec::with_capacity(end - start);
            for index in start..end {
                let outcome = match coordinator.create(requests[index].clone()).await {
                    Ok(id) => BulkOutcome::Created { index, id },
                    Err(e) => BulkOutcome::Failed {
                        index,
                        reason: e.to_string(),
                    },
                };
                outcomes.push(outcome);
            }
            return outcomes;
        }

        let mid = start + (end - start) / 2;
        let left_handle = tokio::spawn(split_and_create(
            coordinator.clone(),
            requests.clone(),
            start,
            mid,
        ));
        let right = split_and_create(coordinator, requests, mid, end).await;

        let mut outcomes = match left_handle.await {
            Ok(left) => left,
            // A panicked subtree surfaces as failures for its whole range.
            Err(join_err) => (start..mid)
                .map(|index| BulkOutcome::Failed {
                    index,
                    reason: format!("bulk worker aborted: {join_err}"),
                })
                .collect(),
        };
        outcomes.extend(right);
        outcomes
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LogEventPublisher;
    use crate::repository::user_repository::UserRepository;
    use crate::service::coordinator::WriteCoordinator;
    use crate::testing::{InMemoryRoleRepository, InMemorySecondarySync, InMemoryUserRepository};
    use std::collections::HashSet;

    fn scheduler_over(users: Arc<InMemoryUserRepository>) -> BulkCreationScheduler {
        let coordinator = WriteCoordinator::new(
            users,
            Arc::new(InMemoryRoleRepository::with_catalog()),
            vec![Arc::new(InMemorySecondarySync::new("search-index"))],
            Arc::new(LogEventPublisher),
        );
        BulkCreationScheduler::new(Arc::new(coordinator))
    }

    fn request(n: usize) -> CreateUserRequest {
        CreateUserRequest {
            name: format!("user-{n}"),
            email: format!("user-{n}@example.com"),
            password: "correct-horse".into(),
            age: None,
            phone_number: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn empty_batch_yields_no_outcomes() {
        let scheduler = scheduler_over(Arc::new(InMemoryUserRepository::default()));
        assert!(scheduler.create_many(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn large_batch_fans_out_without_loss_or_duplication() {
        let users = Arc::new(InMemoryUserRepository::default());
        let scheduler = scheduler_over(users.clone());

        let total = 2 * BULK_CHUNK_THRESHOLD + 1;
        let outcomes = scheduler
            .create_many((0..total).map(request).collect())
            .await;

        assert_eq!(outcomes.len(), total);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.index(), i);
            assert!(matches!(outcome, BulkOutcome::Created { .. }));
        }

        let ids: HashSet<Uuid> = outcomes
            .iter()
            .map(|o| match o {
                BulkOutcome::Created { id, .. } => *id,
                BulkOutcome::Failed { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(ids.len(), total);
        assert_eq!(users.list_active().await.unwrap().len(), total);
    }

    #[tokio::test]
    async fn one_bad_request_fails_alone() {
        let users = Arc::new(InMemoryUserRepository::default());
        let scheduler = scheduler_over(users.clone());

        let total = BULK_CHUNK_THRESHOLD + 3;
        let mut requests: Vec<CreateUserRequest> = (0..total).map(request).collect();
        // Index 2 collides with index 1 on email.
        requests[2].email = requests[1].email.clone();

        let outcomes = scheduler.create_many(requests).await;
        assert_eq!(outcomes.len(), total);

        for (i, outcome) in outcomes.iter().enumerate() {
            if i == 2 {
                assert!(matches!(outcome, BulkOutcome::Failed { .. }));
            } else {
                assert!(matches!(outcome, BulkOutcome::Created { .. }), "index {i}");
            }
        }
        assert_eq!(users.list_active().await.unwrap().len(), total - 1);
    }
}
