//! Write-path coordination across the primary store and secondary stores.

use std::sync::Arc;

use async_trait::async_trait;
use common::{AppError, OptionExt};
use domain::{
    constants::ROLE_USER, CreateUserRequest, NewUser, Password, RequestContext,
    UpdateUserRequest, UserEvent, UserProjection,
};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use uuid::Uuid;

use crate::events::UserEventPublisher;
use crate::repository::{RoleRepository, UserRepository};
use crate::service::policy::AccessPolicy;
use crate::sync::SecondaryStoreSync;

/// Entry point for every user mutation. Mutations return the record
/// identity only; callers fetch detail through the read path.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserWriteCoordinator: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<Uuid, AppError>;

    async fn update(&self, id: Uuid, request: CreateUserRequest) -> Result<Uuid, AppError>;

    async fn update_partial(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: UpdateUserRequest,
    ) -> Result<Uuid, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Rebuild every secondary store from the primary snapshot. Returns the
    /// number of records present in all targets afterwards.
    async fn reconcile_all(&self) -> Result<usize, AppError>;
}

/// Concrete coordinator. The primary write is the commit point; secondary
/// propagation happens strictly afterwards and never fails the call.
pub struct WriteCoordinator {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    sync_targets: Vec<Arc<dyn SecondaryStoreSync>>,
    events: Arc<dyn UserEventPublisher>,
    policy: AccessPolicy,
}

impl WriteCoordinator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        sync_targets: Vec<Arc<dyn SecondaryStoreSync>>,
        events: Arc<dyn UserEventPublisher>,
    ) -> Self {
        Self {
            users,
            roles,
            sync_targets,
            events,
            policy: AccessPolicy,
        }
    }

    async fn propagate_upsert(&self, projection: &UserProjection) {
        for target in &self.sync_targets {
            if let Err(e) = target.upsert(projection).await {
                tracing::warn!(
                    target_store = target.name(),
                    user_id = %projection.id,
                    error = %e,
                    "Secondary store upsert failed"
                );
            }
        }
    }

    async fn propagate_remove(&self, user_id: Uuid) {
        for target in &self.sync_targets {
            if let Err(e) = target.remove(user_id).await {
                tracing::warn!(
                    target_store = target.name(),
                    user_id = %user_id,
                    error = %e,
                    "Secondary store removal failed"
                );
            }
        }
    }

    async fn assign_default_role(&self, user_id: Uuid) {
        match self.roles.find_by_name(ROLE_USER).await {
            Ok(Some(role)) => {
                if let Err(e) = self.roles.assign(user_id, role.id).await {
                    tracing::warn!(user_id = %user_id, error = %e, "Default role assignment failed");
                }
            }
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "Default role missing from catalog");
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Default role lookup failed");
            }
        }
    }

    /// `Conflict` when another active user already holds the email.
    async fn check_email_free(&self, email: &str, own_id: Uuid) -> Result<(), AppError> {
        if let Some(other) = self.users.find_active_by_email(email).await? {
            if other.id != own_id {
                return Err(AppError::conflict("email already in use"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserWriteCoordinator for WriteCoordinator {
    async fn create(&self, request: CreateUserRequest) -> Result<Uuid, AppError> {
        // Fast path; the partial unique index catches concurrent races.
        if self.users.exists_active_email(&request.email).await? {
            return Err(AppError::conflict("email already in use"));
        }

        let password = Password::new(&request.password)?;
        let user = self
            .users
            .insert(NewUser {
                name: request.name.clone(),
                email: request.email.clone(),
                password_hash: password.into_string(),
            })
            .await?;
        tracing::info!(user_id = %user.id, "User created");

        self.assign_default_role(user.id).await;
        self.events
            .publish(&UserEvent::created(&user, &request.password))
            .await;

        let projection = UserProjection::from_user_with_attributes(
            &user,
            request.age,
            request.phone_number,
            request.address,
        );
        self.propagate_upsert(&projection).await;

        Ok(user.id)
    }

    async fn update(&self, id: Uuid, request: CreateUserRequest) -> Result<Uuid, AppError> {
        let mut user = self.users.find_active_by_id(id).await?.ok_or_not_found()?;

        if user.email != request.email {
            self.check_email_free(&request.email, id).await?;
        }

        user.name = request.name;
        user.email = request.email;
        if !request.password.is_empty() {
            user.password_hash = Password::new(&request.password)?.into_string();
        }
        let user = self.users.update(&user).await?;

        let projection = UserProjection::from_user_with_attributes(
            &user,
            request.age,
            request.phone_number,
            request.address,
        );
        self.propagate_upsert(&projection).await;

        Ok(user.id)
    }

    async fn update_partial(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: UpdateUserRequest,
    ) -> Result<Uuid, AppError> {
        let caps = self.policy.capabilities(ctx);

        let mut user = if caps.can_edit_all_fields {
            self.users.find_active_by_id(id).await?.ok_or_not_found()?
        } else {
            let own = self
                .users
                .find_active_by_username(&ctx.username)
                .await?
                .ok_or_not_found()?;
            if own.id != id {
                return Err(AppError::Forbidden);
            }
            let touches_core = patch.name.is_some()
                || patch.email.is_some()
                || patch.password.is_some()
                || patch.is_active.is_some();
            if touches_core {
                return Err(AppError::Forbidden);
            }
            own
        };

        let mut core_changed = false;
        if caps.can_edit_all_fields {
            if let Some(name) = patch.name.clone() {
                user.name = name;
                core_changed = true;
            }
            if let Some(email) = patch.email.clone() {
                if user.email != email {
                    self.check_email_free(&email, id).await?;
                }
                user.email = email;
                core_changed = true;
            }
            if let Some(password) = patch.password.as_deref() {
                user.password_hash = Password::new(password)?.into_string();
                core_changed = true;
            }
            if let Some(is_active) = patch.is_active {
                user.is_active = is_active;
                core_changed = true;
            }
        }

        let user = if core_changed {
            self.users.update(&user).await?
        } else {
            user
        };

        let projection = UserProjection::from_user_with_attributes(
            &user,
            patch.age,
            patch.phone_number.clone(),
            patch.address.clone(),
        );
        self.propagate_upsert(&projection).await;

        Ok(user.id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let user = self.users.soft_delete(id).await?;
        tracing::info!(user_id = %id, "User deactivated");

        self.events.publish(&UserEvent::deleted(&user)).await;
        self.propagate_remove(id).await;
        Ok(())
    }

    async fn reconcile_all(&self) -> Result<usize, AppError> {
        let snapshot: Vec<UserProjection> = self
            .users
            .list_active()
            .await?
            .iter()
            .map(UserProjection::from_user)
            .collect();

        let mut synced_everywhere = snapshot.len();
        for target in &self.sync_targets {
            let count = match target.reconcile_all(&snapshot).await {
                Ok(count) => count,
                Err(e) => {
                    tracing::warn!(target_store = target.name(), error = %e, "Reconcile failed");
                    0
                }
            };
            synced_everywhere = synced_everywhere.min(count);
        }
        Ok(synced_everywhere)
    }
}
