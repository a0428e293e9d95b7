//! Error types for the login checkers.

use thiserror::Error;

/// Main error type for login checking.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Account resolution errors.
    #[error("Lookup error: {kind}")]
    Lookup { kind: LookupErrorKind },

    /// The checker cannot perform the requested operation.
    #[error("Login checker '{checker}' does not support {operation}")]
    NotImplemented {
        checker: &'static str,
        operation: &'static str,
    },

    /// Directory service failures.
    #[error("Directory error: {message}")]
    Directory { message: String },

    /// Account store failures.
    #[error("Account store error: {message}")]
    Store { message: String },

    /// Validation errors.
    #[error("Validation error: {kind}")]
    Validation { kind: ValidationErrorKind },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Account resolution error kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupErrorKind {
    #[error("Given username ({username}) has no account")]
    NoSuchUser { username: String },

    #[error("Given username ({username}) has no {attribute} listed")]
    MissingAttribute {
        username: String,
        attribute: &'static str,
    },

    #[error("Given username ({username}) uses login type '{login_type}' which has no login checker")]
    NoSuchLoginChecker { username: String, login_type: String },
}

/// Validation error kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    #[error("No username given and no session username bound")]
    MissingUsername,

    #[error("Invalid username '{username}': {message}")]
    InvalidUsername { username: String, message: String },

    #[error("Invalid login type '{login_type}': {message}")]
    InvalidLoginType { login_type: String, message: String },
}

impl LoginError {
    /// Shorthand for a `NoSuchUser` lookup failure.
    pub fn no_such_user(username: &str) -> Self {
        LoginError::Lookup {
            kind: LookupErrorKind::NoSuchUser {
                username: username.to_string(),
            },
        }
    }

    /// Whether this is the "account not found" condition.
    pub fn is_no_such_user(&self) -> bool {
        matches!(
            self,
            LoginError::Lookup {
                kind: LookupErrorKind::NoSuchUser { .. }
            }
        )
    }

    /// Stable machine-readable code for audit records and error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            LoginError::Config { .. } => "CONFIG_ERROR",
            LoginError::Lookup { kind } => match kind {
                LookupErrorKind::NoSuchUser { .. } => "NO_SUCH_USER",
                LookupErrorKind::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
                LookupErrorKind::NoSuchLoginChecker { .. } => "NO_SUCH_LOGIN_CHECKER",
            },
            LoginError::NotImplemented { .. } => "NOT_IMPLEMENTED",
            LoginError::Directory { .. } => "DIRECTORY_ERROR",
            LoginError::Store { .. } => "STORE_ERROR",
            LoginError::Validation { .. } => "VALIDATION_ERROR",
            LoginError::Io(_) => "IO_ERROR",
            LoginError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Result type alias for login checking operations.
pub type LoginResult<T> = Result<T, LoginError>;
