//! Write-path services.

pub mod bulk;
pub mod coordinator;
pub mod policy;

pub use bulk::{BulkCreationScheduler, BulkOutcome};
pub use coordinator::{UserWriteCoordinator, WriteCoordinator};
pub use policy::{AccessPolicy, Capabilities};

#[cfg(any(test, feature = "test-utils"))]
pub use coordinator::MockUserWriteCoordinator;
