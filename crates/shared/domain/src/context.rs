//! Request-scoped identity.
//!
//! Authorization-sensitive coordinator calls take the caller's identity as
//! an explicit argument instead of reading it from ambient global state.

use crate::constants::ROLE_ADMIN;

/// The authenticated caller of a request: subject name plus role names,
/// as extracted from a validated token by the (out-of-scope) request layer.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub username: String,
    pub roles: Vec<String>,
}

impl RequestContext {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}
