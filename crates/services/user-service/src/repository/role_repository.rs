//! Role catalog repository.

use async_trait::async_trait;
use common::AppError;
use domain::Role;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use sea_orm::{
    sea_query::OnConflict, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter,
};
use uuid::Uuid;

use super::entities::{role, user_role};

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError>;

    /// Grant a role to a user. Re-granting an already held role is a no-op.
    async fn assign(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError>;

    /// Names of all roles held by the given user.
    async fn role_names_for_user(&self, user_id: Uuid) -> Result<Vec<String>, AppError>;
}

/// SeaORM-backed implementation of [`RoleRepository`].
#[derive(Clone)]
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Role::from))
    }

    async fn assign(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError> {
        let link = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
        };
        user_role::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::RoleId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn role_names_for_user(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let links = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        let role_ids: Vec<Uuid> = links.into_iter().map(|l| l.role_id).collect();
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }
        let roles = role::Entity::find()
            .filter(role::Column::Id.is_in(role_ids))
            .all(&self.db)
            .await?;
        Ok(roles.into_iter().map(|r| r.name).collect())
    }
}
