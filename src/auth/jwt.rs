//! JWT Token Handler
//! Mission: Issue and verify stateless, time-limited bearer tokens

use crate::auth::{error::AuthError, principal::Principal, principal::UserRole};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed signing algorithm. Tokens declaring anything else are rejected.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims written at issue time.
#[derive(Debug, Serialize)]
struct IssuedClaims<'a> {
    sub: &'a str,
    id: i64,
    role: &'a str,
    exp: i64,
}

/// Claims as read back. Every field is optional so that a missing claim is
/// reported as an invalid token rather than a decode error with a different path.
#[derive(Debug, Deserialize)]
struct PresentedClaims {
    sub: Option<String>,
    id: Option<i64>,
    role: Option<String>,
    exp: Option<i64>,
}

/// Signs and verifies tokens with one process-wide secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked in `resolve_principal_at` against the caller's clock, with no leeway.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `username` valid for `ttl` from now.
    pub fn issue_token(
        &self,
        username: &str,
        user_id: i64,
        role: &UserRole,
        ttl: Duration,
    ) -> Result<String> {
        self.issue_token_at(username, user_id, role, ttl, Utc::now())
    }

    pub fn issue_token_at(
        &self,
        username: &str,
        user_id: i64,
        role: &UserRole,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let exp = now
            .checked_add_signed(ttl)
            .context("Invalid timestamp")?
            .timestamp();

        let claims = IssuedClaims {
            sub: username,
            id: user_id,
            role: role.as_str(),
            exp,
        };

        debug!(
            "Generating JWT for user {} ({}), expires in {}m",
            username,
            user_id,
            ttl.num_minutes()
        );

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .context("Failed to generate JWT")
    }

    /// Verify a token and extract the principal it names.
    pub fn resolve_principal(&self, token: &str) -> Result<Principal, AuthError> {
        self.resolve_principal_at(token, Utc::now())
    }

    pub fn resolve_principal_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let claims = decode::<PresentedClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Rejected token: {}", e);
                AuthError::InvalidToken
            })?
            .claims;

        // A token without `exp` never expires.
        if let Some(exp) = claims.exp {
            if now.timestamp() >= exp {
                debug!("Rejected token: expired at {}", exp);
                return Err(AuthError::InvalidToken);
            }
        }

        let (Some(username), Some(id)) = (claims.sub, claims.id) else {
            debug!("Rejected token: missing sub or id");
            return Err(AuthError::InvalidToken);
        };

        debug!("Validated JWT for user {}", username);

        Ok(Principal {
            username,
            id,
            role: claims.role.map(UserRole::from),
        })
    }
}
