//! User lifecycle events published to the notification collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::User;

/// Event discriminator for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserEventKind {
    UserCreated,
    UserDeleted,
}

/// Fire-and-forget event emitted by the request layer after a successful
/// create or delete. The plaintext password is carried only on creation;
/// the downstream welcome-mail flow requires it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "eventType")]
    pub kind: UserEventKind,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserEvent {
    pub fn created(user: &User, plaintext_password: &str) -> Self {
        Self {
            kind: UserEventKind::UserCreated,
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            timestamp: Utc::now(),
            password: Some(plaintext_password.to_string()),
        }
    }

    pub fn deleted(user: &User) -> Self {
        Self {
            kind: UserEventKind::UserDeleted,
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            timestamp: Utc::now(),
            password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "bob".into(),
            email: "bob@example.com".into(),
            password_hash: "hash".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn created_event_carries_plaintext_password() {
        let event = UserEvent::created(&user(), "hunter2hunter2");
        assert_eq!(event.kind, UserEventKind::UserCreated);
        assert_eq!(event.password.as_deref(), Some("hunter2hunter2"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventType"], "USER_CREATED");
    }

    #[test]
    fn deleted_event_omits_password() {
        let event = UserEvent::deleted(&user());
        assert_eq!(event.kind, UserEventKind::UserDeleted);
        assert!(event.password.is_none());
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("password").is_none());
    }
}
