//! Storefront error taxonomy and the view-boundary error handler.

use crate::config::ConfigError;
use sava_auth::AuthError;
use sava_commerce::CommerceError;
use sava_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Any failure a page handler or action can hit.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Broad error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Authentication,
    ProductNotFound,
    InsufficientStock,
    Cart,
    Database,
    Configuration,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Authentication => "AUTH_ERROR",
            ErrorKind::ProductNotFound => "PRODUCT_NOT_FOUND",
            ErrorKind::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorKind::Cart => "CART_ERROR",
            ErrorKind::Database => "DB_ERROR",
            ErrorKind::Configuration => "CONFIG_ERROR",
        }
    }

    fn from_code(code: &str) -> Self {
        match code {
            "VALIDATION_ERROR" => ErrorKind::Validation,
            "AUTH_ERROR" => ErrorKind::Authentication,
            "PRODUCT_NOT_FOUND" => ErrorKind::ProductNotFound,
            "INSUFFICIENT_STOCK" => ErrorKind::InsufficientStock,
            "CART_ERROR" => ErrorKind::Cart,
            "CONFIG_ERROR" => ErrorKind::Configuration,
            _ => ErrorKind::Database,
        }
    }

    /// Severity the notice is shown with.
    pub fn severity(&self) -> Severity {
        match self {
            ErrorKind::Validation | ErrorKind::InsufficientStock => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl StorefrontError {
    pub fn code(&self) -> &'static str {
        match self {
            StorefrontError::Commerce(e) => e.code(),
            StorefrontError::Auth(e) => e.code(),
            StorefrontError::Store(e) => e.code(),
            StorefrontError::Config(e) => e.code(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_code(self.code())
    }

    /// The domain error underneath any store wrapping.
    fn commerce(&self) -> Option<&CommerceError> {
        match self {
            StorefrontError::Commerce(e) | StorefrontError::Store(StoreError::Commerce(e)) => {
                Some(e)
            }
            _ => None,
        }
    }

    fn auth(&self) -> Option<&AuthError> {
        match self {
            StorefrontError::Auth(e) | StorefrontError::Store(StoreError::Auth(e)) => Some(e),
            _ => None,
        }
    }

    /// Form field the error refers to, if any.
    pub fn field(&self) -> Option<String> {
        if let Some(CommerceError::Validation { field, .. }) = self.commerce() {
            return field.clone();
        }
        self.auth().and_then(AuthError::field).map(str::to_string)
    }

    /// Message safe to show a shopper.
    ///
    /// Validation messages are shown as written; infrastructure failures
    /// never leak their details.
    pub fn user_message(&self) -> String {
        if let Some(err) = self.commerce() {
            return match err {
                CommerceError::ProductNotFound(_) => "This product is no longer available.".into(),
                CommerceError::InsufficientStock { available, .. } if *available > 0 => {
                    format!("Only {available} units are available.")
                }
                CommerceError::InsufficientStock { .. } => "This product is out of stock.".into(),
                CommerceError::InvalidQuantity(_) => "Please choose a quantity of at least 1.".into(),
                CommerceError::QuantityExceedsLimit(_, max) => {
                    format!("You can add at most {max} units of one product.")
                }
                CommerceError::Validation { message, .. } => message.clone(),
                CommerceError::Cart(_)
                | CommerceError::CurrencyMismatch { .. }
                | CommerceError::Overflow => "Your cart could not be updated.".into(),
            };
        }
        if let Some(err) = self.auth() {
            return match err {
                AuthError::InvalidCredentials => "Invalid email or password.".into(),
                AuthError::NotSignedIn => "Please sign in to continue.".into(),
                AuthError::PasswordHash => "Sign-in is unavailable right now.".into(),
                AuthError::UserAlreadyExists(_) => "An account with this email already exists.".into(),
                other => capitalize(&other.to_string()),
            };
        }
        match self {
            StorefrontError::Config(_) => "The store is misconfigured.".into(),
            _ => "Something went wrong. Please try again later.".into(),
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// How prominently a notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-visible message produced at the view boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    /// Error code, empty for non-error notices.
    pub code: String,
    pub message: String,
    /// Technical details, only attached in debug mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::plain(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::plain(Severity::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::plain(Severity::Warning, message)
    }

    fn plain(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: String::new(),
            message: message.into(),
            details: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Turns errors into notices and logs them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorHandler {
    debug: bool,
}

impl ErrorHandler {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Log `err` and build the notice shown for it.
    ///
    /// `message` overrides the default user message.
    pub fn handle(&self, err: &StorefrontError, message: Option<&str>) -> Notice {
        let kind = err.kind();
        match kind.severity() {
            Severity::Warning => {
                tracing::warn!(error_code = kind.code(), error = %err, "request rejected")
            }
            _ => tracing::error!(error_code = kind.code(), error = %err, "request failed"),
        }

        Notice {
            severity: kind.severity(),
            code: kind.code().to_string(),
            message: message.map(str::to_string).unwrap_or_else(|| err.user_message()),
            details: self.debug.then(|| format!("{err:?}")),
        }
    }

    /// Run `f`, falling back to `default` and a notice on failure.
    pub fn safe_execute<T, E, F>(&self, f: F, default: T, message: Option<&str>) -> (T, Option<Notice>)
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<StorefrontError>,
    {
        match f() {
            Ok(value) => (value, None),
            Err(err) => {
                let err = err.into();
                let notice = self.handle(&err, message);
                (default, Some(notice))
            }
        }
    }
}
