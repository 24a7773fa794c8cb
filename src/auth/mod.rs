//! Authentication Module
//! Mission: Password hashing, bearer tokens, and per-request authorization

pub mod api;
pub mod error;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod principal;
pub mod user_store;

pub use error::AuthError;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use password::PasswordHasher;
pub use principal::{Principal, UserRole};
pub use user_store::UserStore;
