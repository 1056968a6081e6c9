//! Read-only user lookup seam toward the user service.

use std::sync::Arc;

use async_trait::async_trait;
use common::AppResult;
use domain::UserWithRoles;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use user_service_lib::repository::{RoleRepository, UserRepository};

/// What the authentication gate needs to know about users.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Active user with role names, by login name.
    async fn find_active_by_username(&self, username: &str) -> AppResult<Option<UserWithRoles>>;
}

/// Directory backed directly by the user service repositories, for the
/// modular-monolith deployment where both services share one process.
pub struct RepositoryDirectory {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl RepositoryDirectory {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }
}

#[async_trait]
impl UserDirectory for RepositoryDirectory {
    async fn find_active_by_username(&self, username: &str) -> AppResult<Option<UserWithRoles>> {
        let Some(user) = self.users.find_active_by_username(username).await? else {
            return Ok(None);
        };
        let roles = self.roles.role_names_for_user(user.id).await?;
        Ok(Some(UserWithRoles { user, roles }))
    }
}
