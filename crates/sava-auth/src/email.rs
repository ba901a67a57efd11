//! Email address type.

use crate::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized email address.
///
/// Surrounding whitespace is trimmed and the address is lowercased, so two
/// spellings of the same mailbox compare equal.
///
/// ```
/// use sava_auth::Email;
///
/// assert_eq!(Email::parse(" Ana@Example.com ").unwrap().as_str(), "ana@example.com");
/// assert!(Email::parse("no-at-symbol").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AuthError::InvalidEmail("email cannot be empty".into()));
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(AuthError::InvalidEmail(format!(
                "email must be at most {} characters",
                Self::MAX_LENGTH
            )));
        }

        let (local, domain) = s
            .split_once('@')
            .ok_or_else(|| AuthError::InvalidEmail("email must contain an @ symbol".into()))?;

        if local.is_empty() {
            return Err(AuthError::InvalidEmail("email local part cannot be empty".into()));
        }
        if domain.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(AuthError::InvalidEmail("email domain is not valid".into()));
        }

        Ok(Self(s.to_lowercase()))
    }

    /// Returns the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the local part of the email (before the @).
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for bad in ["", "   ", "no-at-symbol", "@domain.com", "user@", "user@localhost", "a@b@c.com"] {
            assert!(
                matches!(Email::parse(bad), Err(AuthError::InvalidEmail(_))),
                "{bad:?} should be rejected"
            );
        }
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(Email::parse(&long).is_err());
    }

    #[test]
    fn test_normalization() {
        let email = Email::parse("  Ana.Torres@Example.COM").unwrap();
        assert_eq!(email.as_str(), "ana.torres@example.com");
        assert_eq!(email.local_part(), "ana.torres");
    }
}
