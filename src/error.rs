//! Request Errors
//! Mission: One terminal error per request, mapped to a status code and a `{"detail"}` body

use crate::auth::AuthError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const TODO_NOT_FOUND: &str = "Todo not found.";
pub const USER_NOT_FOUND: &str = "User not found.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-range request field.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Resource absent after authorization passed.
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "detail": detail }));

        if matches!(self, ApiError::Auth(ref e) if e.is_token_failure()) {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_token_failure_carries_fixed_message() {
        let resp = ApiError::from(AuthError::InvalidToken).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers()[header::WWW_AUTHENTICATE], "Bearer");
        assert_eq!(
            body_json(resp).await,
            json!({ "detail": "Could not validate user." })
        );
    }

    #[tokio::test]
    async fn test_not_found_is_distinct_from_denied() {
        let not_found = ApiError::NotFound(TODO_NOT_FOUND).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(not_found).await, json!({ "detail": "Todo not found." }));

        let denied = ApiError::from(AuthError::RoleDenied).into_response();
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
        assert!(denied.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let resp = ApiError::from(anyhow::anyhow!("disk on fire")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await,
            json!({ "detail": "Internal server error" })
        );
    }

    #[test]
    fn test_validation_status() {
        assert_eq!(
            ApiError::validation("priority must be between 1 and 5").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Conflict("Username already exists".into()).status(),
            StatusCode::CONFLICT
        );
    }
}
