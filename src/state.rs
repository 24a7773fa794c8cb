use crate::auth::{JwtHandler, PasswordHasher};
use crate::config::Config;
use crate::db::Database;
use anyhow::Result;
use axum::extract::FromRef;
use chrono::Duration;
use std::sync::Arc;

/// Shared application state. Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt_handler: Arc<JwtHandler>,
    pub hasher: PasswordHasher,
    pub token_ttl: Duration,
}

impl AppState {
    pub fn new(
        db: Database,
        jwt_handler: Arc<JwtHandler>,
        hasher: PasswordHasher,
        token_ttl: Duration,
    ) -> Self {
        Self {
            db,
            jwt_handler,
            hasher,
            token_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Database::new(&config.database_path)?,
            Arc::new(JwtHandler::new(&config.jwt_secret)),
            PasswordHasher::new(config.bcrypt_cost),
            config.token_ttl(),
        ))
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
