//! Field-level access policy for partial updates.

use domain::RequestContext;

/// What a caller may touch in a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Core fields (name, email, password, active flag) on any record.
    pub can_edit_all_fields: bool,
    /// Extended contact attributes (age, phone, address) on the caller's
    /// own record only.
    pub can_edit_contact_fields_only: bool,
}

/// Role-based policy: admins edit everything on anyone, regular users edit
/// their own contact attributes and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn capabilities(&self, ctx: &RequestContext) -> Capabilities {
        if ctx.is_admin() {
            Capabilities {
                can_edit_all_fields: true,
                can_edit_contact_fields_only: false,
            }
        } else {
            Capabilities {
                can_edit_all_fields: false,
                can_edit_contact_fields_only: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::constants::{ROLE_ADMIN, ROLE_USER};

    fn ctx(roles: &[&str]) -> RequestContext {
        RequestContext {
            username: "caller".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn admin_edits_all_fields() {
        let caps = AccessPolicy.capabilities(&ctx(&[ROLE_ADMIN]));
        assert!(caps.can_edit_all_fields);
        assert!(!caps.can_edit_contact_fields_only);
    }

    #[test]
    fn regular_user_limited_to_contact_fields() {
        let caps = AccessPolicy.capabilities(&ctx(&[ROLE_USER]));
        assert!(!caps.can_edit_all_fields);
        assert!(caps.can_edit_contact_fields_only);
    }

    #[test]
    fn admin_with_user_role_keeps_admin_capabilities() {
        let caps = AccessPolicy.capabilities(&ctx(&[ROLE_USER, ROLE_ADMIN]));
        assert!(caps.can_edit_all_fields);
    }
}
