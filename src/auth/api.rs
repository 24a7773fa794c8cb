//! Authentication API Endpoints
//! Mission: Registration and password login issuing bearer tokens

use crate::auth::{
    error::AuthError,
    models::{CreateUserRequest, LoginForm, TokenResponse, User},
    user_store::{UserStore, UserStoreError},
};
use crate::api::extract::{ValidForm, ValidJson};
use crate::db::DbConn;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

impl From<UserStoreError> for ApiError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::Duplicate => {
                ApiError::Conflict("Username or email already exists".to_string())
            }
            UserStoreError::Other(e) => ApiError::Internal(e),
        }
    }
}

/// Register endpoint - POST /auth/
pub async fn create_user(
    State(state): State<AppState>,
    DbConn(conn): DbConn,
    ValidJson(payload): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::validation("username must not be empty"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("password must not be empty"));
    }

    let user = UserStore::new(&conn).create_user(&state.hasher, &payload)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login endpoint - POST /auth/token
pub async fn login_for_access_token(
    State(state): State<AppState>,
    DbConn(conn): DbConn,
    ValidForm(form): ValidForm<LoginForm>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    info!("Login attempt: {}", form.username);

    let Some(user) = UserStore::new(&conn).authenticate(&state.hasher, &form.username, &form.password)?
    else {
        warn!("Failed login attempt: {}", form.username);
        return Err(AuthError::InvalidCredentials.into());
    };

    let token = state
        .jwt_handler
        .issue_token(&user.username, user.id, &user.role, state.token_ttl)?;

    info!("Login successful: {} ({})", user.username, user.role);

    Ok((StatusCode::CREATED, Json(TokenResponse::bearer(token))))
}
