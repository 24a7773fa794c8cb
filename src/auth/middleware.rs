//! Authentication Middleware
//! Mission: Resolve the bearer token into a Principal before any handler runs

use crate::auth::{error::AuthError, jwt::JwtHandler};
use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Pull the token out of `Authorization: Bearer <token>`. Scheme match is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Rejects the request with 401 unless it carries a valid token; otherwise the
/// resolved `Principal` is placed in the request extensions.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = {
        let token = bearer_token(req.headers())?;
        jwt_handler.resolve_principal(token)?
    };

    debug!(
        "Authenticated {} (id {}) for {} {}",
        principal.username,
        principal.id,
        req.method(),
        req.uri().path()
    );

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
