//! Store error types.

use sava_auth::AuthError;
use sava_commerce::CommerceError;
use thiserror::Error;

/// Errors returned by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A domain rule rejected the operation.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Account validation or sign-in failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The backing store is unavailable or inconsistent.
    #[error("database error: {0}")]
    Database(String),

    /// Snapshot file could not be read or written.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot contents are not valid.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Commerce(e) => e.code(),
            StoreError::Auth(e) => e.code(),
            StoreError::Database(_) | StoreError::Io(_) | StoreError::Serialization(_) => {
                "DB_ERROR"
            }
        }
    }

    /// Check if the backing store itself failed, as opposed to a rejected request.
    pub fn is_infrastructure(&self) -> bool {
        self.code() == "DB_ERROR"
    }
}
