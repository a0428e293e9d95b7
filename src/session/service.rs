//! Audited login checks for request handlers.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger, AuditResult, AuditSink, NullAuditLogger, Operation};
use crate::checkers::{LoginChecker, ProgressiveChecker};
use crate::config::Settings;
use crate::error::LoginResult;

use super::principal::Session;

/// Entry point request handlers use for login checks.
///
/// Every call names its user explicitly or falls back to the session's
/// user, and leaves one audit entry behind whatever the outcome.
pub struct LoginService {
    checker: Arc<dyn LoginChecker>,
    audit: Arc<dyn AuditSink>,
}

impl LoginService {
    pub fn new(checker: Arc<dyn LoginChecker>, audit: Arc<dyn AuditSink>) -> Self {
        Self { checker, audit }
    }

    /// Build the dispatching checker and audit log described by `settings`.
    pub fn from_settings(settings: &Settings) -> LoginResult<Self> {
        let checker = ProgressiveChecker::from_settings(settings)?;

        let audit: Arc<dyn AuditSink> = if settings.audit.enabled {
            Arc::new(AuditLogger::new(&settings.audit.log_path)?)
        } else {
            info!("Audit logging disabled");
            Arc::new(NullAuditLogger::new())
        };

        Ok(Self::new(Arc::new(checker), audit))
    }

    /// Whether the user has an account.
    pub fn user_exists(&self, session: &Session, username: Option<&str>) -> LoginResult<bool> {
        let username = session.resolve_username(username)?;
        self.audited(
            Operation::UserExists,
            username,
            |c| c.user_exists(username),
            |found| AuditResult::outcome(*found),
        )
    }

    /// Check `password` for the user.
    ///
    /// On success the session is bound to the verified user.
    pub fn verify_password(
        &self,
        session: &mut Session,
        password: &str,
        username: Option<&str>,
    ) -> LoginResult<bool> {
        let username = session.resolve_username(username)?.to_string();

        let verified = self.audited(
            Operation::VerifyPassword,
            &username,
            |c| c.is_correct_password(password, &username),
            |ok| AuditResult::outcome(*ok),
        )?;

        if verified {
            session.bind(username);
        }

        Ok(verified)
    }

    /// The user's stored password digest.
    pub fn password_digest(&self, session: &Session, username: Option<&str>) -> LoginResult<String> {
        let username = session.resolve_username(username)?;
        self.audited(
            Operation::PasswordDigest,
            username,
            |c| c.password_digest(username),
            |_| AuditResult::completed(),
        )
    }

    fn audited<T>(
        &self,
        operation: Operation,
        username: &str,
        check: impl FnOnce(&dyn LoginChecker) -> LoginResult<T>,
        describe: impl FnOnce(&T) -> AuditResult,
    ) -> LoginResult<T> {
        let started = Instant::now();
        let result = check(&*self.checker);
        let duration_ms = started.elapsed().as_millis() as u64;

        let audit_result = match &result {
            Ok(value) => describe(value),
            Err(e) => {
                warn!(
                    operation = operation.as_str(),
                    username,
                    code = e.code(),
                    error = %e,
                    "Login check failed"
                );
                AuditResult::from_error(e)
            }
        };

        let entry = AuditEntry::new(operation, username, audit_result, duration_ms);
        if let Err(e) = self.audit.log(&entry) {
            warn!(error = %e, attempt_id = %entry.attempt_id, "Failed to write audit entry");
        }

        result
    }
}
