//! Stateful in-memory fakes shared by service-layer tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use common::AppError;
use domain::{NewUser, Role, User, UserProjection};
use uuid::Uuid;

use crate::repository::{RoleRepository, UserRepository};
use crate::sync::SecondaryStoreSync;

#[derive(Default)]
pub(crate) struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub(crate) fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.get(id).filter(|u| u.is_active))
    }

    async fn find_by_id_any(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.get(id))
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.is_active && u.email == email)
            .cloned())
    }

    async fn find_active_by_username(&self, name: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.is_active && u.name == name)
            .cloned())
    }

    async fn exists_active_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.is_active && u.email == email))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.is_active && u.email == new_user.email)
        {
            return Err(AppError::conflict("email already in use"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(AppError::NotFound);
        }
        let mut updated = user.clone();
        updated.updated_at = Utc::now();
        users.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .filter(|u| u.is_active)
            .ok_or(AppError::NotFound)?;
        user.deactivate();
        Ok(user.clone())
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.is_active)
            .cloned()
            .collect())
    }
}

pub(crate) struct InMemoryRoleRepository {
    roles: Vec<Role>,
    assignments: Mutex<Vec<(Uuid, Uuid)>>,
}

impl InMemoryRoleRepository {
    pub(crate) fn with_catalog() -> Self {
        Self {
            roles: vec![
                Role {
                    id: Uuid::new_v4(),
                    name: domain::constants::ROLE_USER.into(),
                },
                Role {
                    id: Uuid::new_v4(),
                    name: domain::constants::ROLE_ADMIN.into(),
                },
            ],
            assignments: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn empty_catalog() -> Self {
        Self {
            roles: Vec::new(),
            assignments: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        Ok(self.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn assign(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError> {
        let mut assignments = self.assignments.lock().unwrap();
        if !assignments.contains(&(user_id, role_id)) {
            assignments.push((user_id, role_id));
        }
        Ok(())
    }

    async fn role_names_for_user(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let assignments = self.assignments.lock().unwrap();
        Ok(self
            .roles
            .iter()
            .filter(|r| assignments.contains(&(user_id, r.id)))
            .map(|r| r.name.clone())
            .collect())
    }
}

/// Merge-upserting secondary store fake with a failure toggle.
pub(crate) struct InMemorySecondarySync {
    label: &'static str,
    docs: Mutex<HashMap<Uuid, UserProjection>>,
    failing: AtomicBool,
}

impl InMemorySecondarySync {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            docs: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn snapshot(&self) -> HashMap<Uuid, UserProjection> {
        self.docs.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::secondary_store(format!("{} unavailable", self.label)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SecondaryStoreSync for InMemorySecondarySync {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn upsert(&self, projection: &UserProjection) -> Result<(), AppError> {
        self.check()?;
        let mut docs = self.docs.lock().unwrap();
        let merged = match docs.get(&projection.id) {
            Some(existing) => existing.clone().merged_with(projection),
            None => projection.clone(),
        };
        docs.insert(projection.id, merged);
        Ok(())
    }

    async fn remove(&self, user_id: Uuid) -> Result<(), AppError> {
        self.check()?;
        self.docs.lock().unwrap().remove(&user_id);
        Ok(())
    }

    async fn bulk_upsert(&self, projections: &[UserProjection]) -> Result<usize, AppError> {
        for projection in projections {
            self.upsert(projection).await?;
        }
        Ok(projections.len())
    }

    async fn reconcile_all(&self, projections: &[UserProjection]) -> Result<usize, AppError> {
        self.check()?;
        let mut docs = self.docs.lock().unwrap();
        docs.clear();
        for projection in projections {
            docs.insert(projection.id, projection.clone());
        }
        Ok(docs.len())
    }
}
