//! User profile endpoints. Always the caller's own record.

use crate::api::extract::{ValidJson, ValidPath};
use crate::auth::{
    error::AuthError,
    models::{User, UserPasswordRequest},
    Principal, UserStore,
};
use crate::db::DbConn;
use crate::error::{ApiError, USER_NOT_FOUND};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::{info, warn};

/// GET /users/user
pub async fn get_user(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
) -> Result<Json<User>, ApiError> {
    UserStore::new(&conn)
        .get_user_by_id(principal.id)?
        .map(Json)
        .ok_or(ApiError::NotFound(USER_NOT_FOUND))
}

/// PUT /users/user/update_password
pub async fn update_password(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
    ValidJson(req): ValidJson<UserPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    if req.new_password.chars().count() < 3 {
        return Err(ApiError::validation("new_password must be at least 3 characters"));
    }

    let store = UserStore::new(&conn);
    let user = store
        .get_user_by_id(principal.id)?
        .ok_or(ApiError::NotFound(USER_NOT_FOUND))?;

    if !state.hasher.verify(&req.password, &user.hashed_password) {
        warn!("Password change rejected for {}", user.username);
        return Err(AuthError::PasswordMismatch.into());
    }

    let digest = state.hasher.hash(&req.new_password)?;
    store.update_password(user.id, &digest)?;

    info!("Password changed for {}", user.username);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /users/user/update_phone_number/:phone_number
pub async fn update_phone_number(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
    ValidPath(phone_number): ValidPath<String>,
) -> Result<StatusCode, ApiError> {
    if phone_number.trim().is_empty() {
        return Err(ApiError::validation("phone_number must not be empty"));
    }

    if !UserStore::new(&conn).update_phone_number(principal.id, &phone_number)? {
        return Err(ApiError::NotFound(USER_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}
