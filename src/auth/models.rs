//! Authentication Models
//! Mission: User records and the request/response shapes of the auth endpoints

use crate::auth::principal::UserRole;
use serde::{Deserialize, Serialize};

/// Credential Store row.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String, // bcrypt digest - never serialize
    pub is_active: bool,
    pub role: UserRole,
    pub phone_number: Option<String>,
}

/// Registration body - POST /auth/
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Login form - POST /auth/token (application/x-www-form-urlencoded)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Password change body - PUT /users/user/update_password
#[derive(Debug, Deserialize)]
pub struct UserPasswordRequest {
    pub password: String,
    pub new_password: String,
}
