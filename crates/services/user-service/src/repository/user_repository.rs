//! User repository: the primary relational store.

use async_trait::async_trait;
use chrono::Utc;
use common::{AppError, OptionExt};
use domain::{NewUser, User};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, SqlErr,
};
use uuid::Uuid;

use super::entities::user;

/// Data access contract for the primary user store. All mutations here are
/// the commit point of the write path: once a call returns `Ok`, the change
/// is durable regardless of what happens in secondary stores afterwards.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up an active user by id. Soft-deleted records are invisible.
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Look up a user by id regardless of active flag.
    async fn find_by_id_any(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Look up an active user by email.
    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Look up an active user by display name. Used by the login path.
    async fn find_active_by_username(&self, name: &str) -> Result<Option<User>, AppError>;

    /// Fast-path existence check for active-email uniqueness.
    async fn exists_active_email(&self, email: &str) -> Result<bool, AppError>;

    /// Insert a new user row. A unique-constraint violation on the active
    /// email index surfaces as [`AppError::Conflict`].
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Persist updated core fields of an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Flip the active flag off. Returns the deactivated record.
    async fn soft_delete(&self, id: Uuid) -> Result<User, AppError>;

    /// All currently active users.
    async fn list_active(&self) -> Result<Vec<User>, AppError>;
}

/// SeaORM-backed implementation of [`UserRepository`].
#[derive(Clone)]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let model = user::Entity::find_by_id(id)
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn find_by_id_any(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn find_active_by_username(&self, name: &str) -> Result<Option<User>, AppError> {
        let model = user::Entity::find()
            .filter(user::Column::Name.eq(name))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn exists_active_email(&self, email: &str) -> Result<bool, AppError> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let now = Utc::now();
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        match active.insert(&self.db).await {
            Ok(model) => Ok(model.into()),
            // The partial unique index on (email) WHERE is_active catches
            // concurrent creates that slipped past the existence check.
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AppError::conflict("email already in use"))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update(&self, u: &User) -> Result<User, AppError> {
        let active = user::ActiveModel {
            id: Set(u.id),
            name: Set(u.name.clone()),
            email: Set(u.email.clone()),
            password_hash: Set(u.password_hash.clone()),
            is_active: Set(u.is_active),
            created_at: Set(u.created_at),
            updated_at: Set(Utc::now()),
        };
        match active.update(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AppError::conflict("email already in use"))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn soft_delete(&self, id: Uuid) -> Result<User, AppError> {
        let model = user::Entity::find_by_id(id)
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await?;
        Ok(model.into())
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        let models = user::Entity::find()
            .filter(user::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }
}
