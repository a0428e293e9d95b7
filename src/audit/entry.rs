//! Audit entry types.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::LoginError;

/// The checker operation an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    UserExists,
    VerifyPassword,
    PasswordDigest,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::UserExists => "user_exists",
            Operation::VerifyPassword => "verify_password",
            Operation::PasswordDigest => "password_digest",
        }
    }
}

/// A single audit log entry.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
    /// Unique identifier for the check.
    pub attempt_id: Uuid,
    pub operation: Operation,
    /// Username the check was made for.
    pub username: String,
    pub result: AuditResult,
    /// Check duration in milliseconds.
    pub duration_ms: u64,
}

impl AuditEntry {
    /// Create an entry stamped with the current time and a fresh attempt id.
    pub fn new(operation: Operation, username: &str, result: AuditResult, duration_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            attempt_id: Uuid::new_v4(),
            operation,
            username: username.to_string(),
            result,
            duration_ms,
        }
    }
}

/// Result of a check for audit purposes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
pub enum AuditResult {
    /// The check completed.
    #[serde(rename = "success")]
    Success {
        /// Boolean answer of the check; absent for digest lookups.
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<bool>,
    },
    /// The check failed with an error.
    #[serde(rename = "failure")]
    Failure {
        error_code: String,
        error_message: String,
    },
}

impl AuditResult {
    pub fn outcome(outcome: bool) -> Self {
        AuditResult::Success {
            outcome: Some(outcome),
        }
    }

    pub fn completed() -> Self {
        AuditResult::Success { outcome: None }
    }

    pub fn from_error(error: &LoginError) -> Self {
        AuditResult::Failure {
            error_code: error.code().to_string(),
            error_message: error.to_string(),
        }
    }
}
