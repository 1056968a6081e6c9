//! Startup bootstrap: admin account initialization and search index
//! reconciliation. Both are idempotent and safe to re-run.

use std::sync::Arc;

use common::{config::AdminConfig, AppError};
use domain::{constants::ROLE_ADMIN, NewUser, Password, UserProjection};
use uuid::Uuid;

use crate::repository::{RoleRepository, UserRepository};
use crate::sync::SecondaryStoreSync;

/// Create the configured admin account if it does not exist yet. Returns
/// the admin user id. A missing `admin` catalog role is logged and skipped.
pub async fn initialize_admin(
    users: &Arc<dyn UserRepository>,
    roles: &Arc<dyn RoleRepository>,
    config: &AdminConfig,
) -> Result<Uuid, AppError> {
    if let Some(existing) = users.find_active_by_username(&config.username).await? {
        tracing::info!(user_id = %existing.id, "Admin account already present");
        return Ok(existing.id);
    }

    let password = Password::new(&config.password)?;
    let admin = users
        .insert(NewUser {
            name: config.username.clone(),
            email: config.email.clone(),
            password_hash: password.into_string(),
        })
        .await?;
    tracing::info!(user_id = %admin.id, "Admin account created");

    match roles.find_by_name(ROLE_ADMIN).await {
        Ok(Some(role)) => {
            if let Err(e) = roles.assign(admin.id, role.id).await {
                tracing::warn!(user_id = %admin.id, error = %e, "Admin role assignment failed");
            }
        }
        Ok(None) => tracing::warn!("Admin role missing from catalog"),
        Err(e) => tracing::warn!(error = %e, "Admin role lookup failed"),
    }

    Ok(admin.id)
}

/// One-time rebuild of the search index from the primary store. Failures
/// are logged and never block startup.
pub async fn reconcile_search_index(
    users: &Arc<dyn UserRepository>,
    search: &Arc<dyn SecondaryStoreSync>,
) -> usize {
    let snapshot: Vec<UserProjection> = match users.list_active().await {
        Ok(active) => active.iter().map(UserProjection::from_user).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Startup reconcile skipped: primary snapshot failed");
            return 0;
        }
    };

    match search.reconcile_all(&snapshot).await {
        Ok(count) => {
            tracing::info!(count, "Search index reconciled at startup");
            count
        }
        Err(e) => {
            tracing::warn!(target_store = search.name(), error = %e, "Startup reconcile failed");
            0
        }
    }
}
