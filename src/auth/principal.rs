//! Authenticated Principal
//! Mission: The per-request identity derived from a verified token

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag carried on users and tokens.
///
/// Registration accepts any string; only `admin` has meaning to the guard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Admin,
    User,
    Other(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Other(s) => s,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        match s.as_str() {
            "admin" => UserRole::Admin,
            "user" => UserRole::User,
            _ => UserRole::Other(s),
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        UserRole::from(s.to_string())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity resolved from a bearer token for the duration of one request.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub username: String,
    pub id: i64,
    /// `None` when the token carried no `role` claim.
    pub role: Option<UserRole>,
}

impl Principal {
    pub fn has_role(&self, role: &UserRole) -> bool {
        self.role.as_ref() == Some(role)
    }
}
