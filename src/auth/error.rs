use thiserror::Error;

/// Message returned for every token or login failure. Deliberately says nothing
/// about which check failed.
pub const COULD_NOT_VALIDATE: &str = "Could not validate user.";

/// Auth failure kinds. All of them surface as 401.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingToken,

    /// Bad signature, wrong algorithm, expired, or missing `sub`/`id`/`exp`.
    #[error("Could not validate user.")]
    InvalidToken,

    /// Unknown username or wrong password at login.
    #[error("Could not validate user.")]
    InvalidCredentials,

    /// Valid principal without the role an endpoint requires.
    #[error("Authentication Failed")]
    RoleDenied,

    /// Current password did not match on password change.
    #[error("Error on password change")]
    PasswordMismatch,
}

impl AuthError {
    /// Failures of the bearer credential itself, as opposed to policy decisions.
    pub fn is_token_failure(&self) -> bool {
        matches!(self, AuthError::MissingToken | AuthError::InvalidToken)
    }
}
