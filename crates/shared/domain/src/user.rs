//! User domain entity, role catalog types and store projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity. The single authoritative record for an account;
/// mutated only through the write coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Soft-delete flag: deletion flips this to false, the row is never
    /// physically erased.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Soft delete the user
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// A user together with the names of its assigned roles.
#[derive(Debug, Clone)]
pub struct UserWithRoles {
    pub user: User,
    pub roles: Vec<String>,
}

/// Named role from the role catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
}

/// Insert payload for a new primary record (password already hashed).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Creation request as handed to the write coordinator by the request
/// layer. Extended attributes live in the secondary profile store only.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// Plaintext password; hashed by the coordinator before any write.
    pub password: String,
    pub age: Option<i32>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Partial-update request: only `Some` fields overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub age: Option<i32>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Flat projection of a user record handed to secondary stores. Extended
/// attributes are optional; `None` means "unknown to the caller", which
/// sync strategies must not interpret as an instruction to clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProjection {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProjection {
    /// Project from the primary record alone; extended attributes unknown.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: None,
            phone_number: None,
            address: None,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    /// Project from the primary record plus explicitly supplied extended
    /// attributes (e.g. from a creation or patch request).
    pub fn from_user_with_attributes(
        user: &User,
        age: Option<i32>,
        phone_number: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            age,
            phone_number,
            address,
            ..Self::from_user(user)
        }
    }

    /// Overlay another projection's `Some` fields onto this one. Used by
    /// read-merge-write upserts so replays are idempotent.
    pub fn merged_with(mut self, incoming: &UserProjection) -> Self {
        self.name = incoming.name.clone();
        self.email = incoming.email.clone();
        self.is_active = incoming.is_active;
        self.created_at = incoming.created_at;
        self.updated_at = incoming.updated_at;
        if incoming.age.is_some() {
            self.age = incoming.age;
        }
        if incoming.phone_number.is_some() {
            self.phone_number = incoming.phone_number.clone();
        }
        if incoming.address.is_some() {
            self.address = incoming.address.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn projection_from_user_leaves_attributes_unknown() {
        let p = UserProjection::from_user(&user());
        assert!(p.age.is_none());
        assert!(p.phone_number.is_none());
        assert!(p.address.is_none());
        assert!(p.is_active);
    }

    #[test]
    fn merge_preserves_existing_attributes_when_incoming_is_none() {
        let u = user();
        let existing = UserProjection::from_user_with_attributes(
            &u,
            Some(30),
            Some("555-0100".into()),
            None,
        );
        let incoming = UserProjection::from_user_with_attributes(&u, None, None, Some("Elm St".into()));
        let merged = existing.merged_with(&incoming);
        assert_eq!(merged.age, Some(30));
        assert_eq!(merged.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(merged.address.as_deref(), Some("Elm St"));
    }

    #[test]
    fn merge_is_idempotent() {
        let u = user();
        let existing = UserProjection::from_user_with_attributes(&u, Some(30), None, None);
        let incoming = UserProjection::from_user_with_attributes(&u, Some(31), None, None);
        let once = existing.clone().merged_with(&incoming);
        let twice = once.clone().merged_with(&incoming);
        assert_eq!(once, twice);
    }
}
