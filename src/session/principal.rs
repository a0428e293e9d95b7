//! Session principal.

use crate::error::{LoginError, LoginResult, ValidationErrorKind};
use crate::validation::validate_username;

/// The acting user of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    username: Option<String>,
}

impl Session {
    /// A session with no bound user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session bound to `username`.
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Remember `username` as the session's user.
    pub fn bind(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn clear(&mut self) {
        self.username = None;
    }

    /// Pick the username a check applies to.
    ///
    /// An explicit username always wins; the session's user is only the
    /// fallback. The result is validated either way.
    pub fn resolve_username<'a>(&'a self, explicit: Option<&'a str>) -> LoginResult<&'a str> {
        let username = explicit
            .or(self.username.as_deref())
            .ok_or(LoginError::Validation {
                kind: ValidationErrorKind::MissingUsername,
            })?;
        validate_username(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_username_wins() {
        let session = Session::for_user("alice");
        assert_eq!(session.resolve_username(Some("bob")).unwrap(), "bob");
    }

    #[test]
    fn test_session_username_is_default() {
        let session = Session::for_user("alice");
        assert_eq!(session.resolve_username(None).unwrap(), "alice");
    }

    #[test]
    fn test_no_username_at_all() {
        let session = Session::anonymous();
        assert!(matches!(
            session.resolve_username(None),
            Err(LoginError::Validation {
                kind: ValidationErrorKind::MissingUsername
            })
        ));
    }

    #[test]
    fn test_resolved_username_is_validated() {
        let session = Session::anonymous();
        assert!(session.resolve_username(Some("has space")).is_err());
    }

    #[test]
    fn test_bind_and_clear() {
        let mut session = Session::anonymous();
        session.bind("carol");
        assert_eq!(session.username(), Some("carol"));
        session.clear();
        assert!(session.username().is_none());
    }
}
