//! Authentication module for the SAVA storefront.
//!
//! Provides email parsing, the password policy, Argon2 password hashing and
//! the account records the store keeps for each user.

mod email;
mod error;
mod password;
mod user;

pub use email::Email;
pub use error::AuthError;
pub use password::PasswordHasher;
pub use user::{UserCredentials, UserProfile};
