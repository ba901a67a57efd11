//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An account already uses this email.
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    /// Email failed to parse.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// Password too weak.
    #[error("password too weak: {0}")]
    WeakPassword(String),

    /// Display name missing.
    #[error("display name is required")]
    MissingDisplayName,

    /// Hashing backend failed.
    #[error("failed to hash password")]
    PasswordHash,

    /// An operation needs a signed-in user.
    #[error("sign in required")]
    NotSignedIn,
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::NotSignedIn | AuthError::PasswordHash
        )
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        if self.is_auth_failure() {
            "AUTH_ERROR"
        } else {
            "VALIDATION_ERROR"
        }
    }

    /// Form field the error belongs to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AuthError::InvalidEmail(_) | AuthError::UserAlreadyExists(_) => Some("email"),
            AuthError::WeakPassword(_) => Some("password"),
            AuthError::MissingDisplayName => Some("display_name"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(AuthError::InvalidCredentials.code(), "AUTH_ERROR");
        assert_eq!(AuthError::NotSignedIn.code(), "AUTH_ERROR");
        assert_eq!(AuthError::WeakPassword("x".into()).code(), "VALIDATION_ERROR");
        assert_eq!(AuthError::UserAlreadyExists("a@b.co".into()).field(), Some("email"));
    }
}
