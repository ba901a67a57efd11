//! User types.

use crate::{AuthError, Email, PasswordHasher};
use chrono::{DateTime, Utc};
use sava_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// Public account data shown by the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// User ID.
    pub uid: UserId,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Whether email is verified.
    #[serde(default)]
    pub email_verified: bool,
}

impl UserProfile {
    /// First word of the display name, for greetings.
    pub fn first_name(&self) -> &str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(self.email.as_str())
    }
}

/// Stored user credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentials {
    /// User ID.
    pub uid: UserId,
    /// Normalized email address.
    pub email: Email,
    /// Argon2 PHC hash.
    pub password_hash: String,
    /// Display name.
    pub display_name: String,
    /// Whether email is verified.
    #[serde(default)]
    pub email_verified: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last successful sign-in.
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl UserCredentials {
    /// Validate sign-up input and hash the password.
    ///
    /// Returns an error if:
    /// - The email does not parse
    /// - The password fails the strength policy
    /// - The display name is blank
    pub fn register(email: &str, password: &str, display_name: &str) -> Result<Self, AuthError> {
        let email = Email::parse(email)?;
        PasswordHasher::validate_password(password)?;
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(AuthError::MissingDisplayName);
        }

        Ok(Self {
            uid: UserId::generate(),
            email,
            password_hash: PasswordHasher.hash(password)?,
            display_name: display_name.to_string(),
            email_verified: false,
            created_at: Utc::now(),
            last_sign_in_at: None,
        })
    }

    /// Check a password, recording the sign-in on success.
    pub fn authenticate(&mut self, password: &str) -> Result<UserProfile, AuthError> {
        PasswordHasher.verify(password, &self.password_hash)?;
        self.last_sign_in_at = Some(Utc::now());
        Ok(self.profile())
    }

    /// Public view of this account.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            uid: self.uid.clone(),
            email: self.email.to_string(),
            display_name: self.display_name.clone(),
            email_verified: self.email_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_authenticate() {
        let mut creds = UserCredentials::register("Ana@Example.com", "SecurePass1", " Ana Torres ").unwrap();
        assert_eq!(creds.email.as_str(), "ana@example.com");
        assert_eq!(creds.display_name, "Ana Torres");
        assert_ne!(creds.password_hash, "SecurePass1");

        let profile = creds.authenticate("SecurePass1").unwrap();
        assert_eq!(profile.uid, creds.uid);
        assert_eq!(profile.first_name(), "Ana");
        assert!(creds.last_sign_in_at.is_some());
    }

    #[test]
    fn test_wrong_password() {
        let mut creds = UserCredentials::register("ana@example.com", "SecurePass1", "Ana").unwrap();
        assert_eq!(creds.authenticate("nope"), Err(AuthError::InvalidCredentials));
        assert!(creds.last_sign_in_at.is_none());
    }

    #[test]
    fn test_register_validation() {
        assert!(matches!(
            UserCredentials::register("bad", "SecurePass1", "Ana"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            UserCredentials::register("ana@example.com", "weak", "Ana"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            UserCredentials::register("ana@example.com", "SecurePass1", "  "),
            Err(AuthError::MissingDisplayName)
        ));
    }

    #[test]
    fn test_profile_serialization() {
        let creds = UserCredentials::register("ana@example.com", "SecurePass1", "Ana").unwrap();
        let json = serde_json::to_value(creds.profile()).unwrap();
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["email_verified"], false);
    }
}
