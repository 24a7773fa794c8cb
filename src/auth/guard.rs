//! Authorization Guard
//! Mission: Turn a verified principal into proof of what it may touch
//!
//! Stores never accept a raw owner id from a handler. Owner-scoped queries take
//! an [`OwnerScope`], admin queries take an [`AdminScope`], and both can only be
//! obtained from a [`Principal`] that passed the matching policy.

use crate::auth::{
    error::AuthError,
    principal::{Principal, UserRole},
};
use tracing::warn;

/// Ownership policy: rows visible and mutable only where `owner_id` equals the principal's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerScope {
    owner_id: i64,
}

impl OwnerScope {
    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn owns(&self, owner_id: i64) -> bool {
        self.owner_id == owner_id
    }
}

impl From<&Principal> for OwnerScope {
    fn from(principal: &Principal) -> Self {
        Self {
            owner_id: principal.id,
        }
    }
}

/// Role policy passed for `admin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminScope {
    admin_id: i64,
}

impl AdminScope {
    pub fn admin_id(&self) -> i64 {
        self.admin_id
    }
}

/// Require an exact role. A principal whose token had no role claim never passes.
pub fn require_role(principal: &Principal, role: &UserRole) -> Result<(), AuthError> {
    if principal.has_role(role) {
        Ok(())
    } else {
        warn!(
            "Role check failed for {} ({}): need {}, have {}",
            principal.username,
            principal.id,
            role,
            principal.role.as_ref().map(UserRole::as_str).unwrap_or("<none>")
        );
        Err(AuthError::RoleDenied)
    }
}

pub fn require_admin(principal: &Principal) -> Result<AdminScope, AuthError> {
    require_role(principal, &UserRole::Admin)?;
    Ok(AdminScope {
        admin_id: principal.id,
    })
}

pub fn owner_scope(principal: &Principal) -> OwnerScope {
    OwnerScope::from(principal)
}
