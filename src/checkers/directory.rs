//! Directory-service login checker.

use std::sync::Arc;

use tracing::debug;

use crate::directory::DirectoryClient;
use crate::error::{LoginError, LoginResult};

use super::traits::LoginChecker;

/// Checks users against an identity directory.
///
/// Existence is a directory lookup by mail address and verification is a
/// bind attempt. The directory never hands out password digests.
#[derive(Clone)]
pub struct DirectoryChecker {
    client: Arc<dyn DirectoryClient>,
}

impl DirectoryChecker {
    pub fn new(client: Arc<dyn DirectoryClient>) -> Self {
        Self { client }
    }
}

impl LoginChecker for DirectoryChecker {
    fn kind(&self) -> &'static str {
        "directory"
    }

    fn user_exists(&self, username: &str) -> LoginResult<bool> {
        self.client.has_account(username)
    }

    fn is_correct_password(&self, password: &str, username: &str) -> LoginResult<bool> {
        // An empty password makes an LDAP simple bind anonymous, which succeeds.
        if password.is_empty() {
            debug!(username, "Empty password refused without bind");
            return Ok(false);
        }
        self.client.has_valid_credentials(username, password)
    }

    fn password_digest(&self, _username: &str) -> LoginResult<String> {
        Err(LoginError::NotImplemented {
            checker: self.kind(),
            operation: "password digests",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::FileDirectory;

    /// Directory that fails every call, to prove a call did not happen.
    struct Unreachable;

    impl DirectoryClient for Unreachable {
        fn has_account(&self, _username: &str) -> LoginResult<bool> {
            Err(LoginError::Directory {
                message: "unreachable".to_string(),
            })
        }

        fn has_valid_credentials(&self, _username: &str, _password: &str) -> LoginResult<bool> {
            Err(LoginError::Directory {
                message: "unreachable".to_string(),
            })
        }
    }

    fn checker() -> DirectoryChecker {
        DirectoryChecker::new(Arc::new(
            FileDirectory::new().with_identity("a.b@example.com", "s3cret"),
        ))
    }

    #[test]
    fn test_user_exists() {
        let checker = checker();
        assert!(checker.user_exists("a.b@example.com").unwrap());
        assert!(!checker.user_exists("nobody@example.com").unwrap());
    }

    #[test]
    fn test_bind() {
        let checker = checker();
        assert!(checker.is_correct_password("s3cret", "a.b@example.com").unwrap());
        assert!(!checker.is_correct_password("wrong", "a.b@example.com").unwrap());
    }

    #[test]
    fn test_empty_password_skips_directory() {
        let checker = DirectoryChecker::new(Arc::new(Unreachable));
        assert!(!checker.is_correct_password("", "a@example.com").unwrap());
        assert!(checker.is_correct_password("x", "a@example.com").is_err());
    }

    #[test]
    fn test_digest_not_implemented() {
        let result = checker().password_digest("a.b@example.com");
        assert!(matches!(
            result,
            Err(LoginError::NotImplemented {
                checker: "directory",
                ..
            })
        ));
    }

    #[test]
    fn test_directory_errors_propagate() {
        let checker = DirectoryChecker::new(Arc::new(Unreachable));
        assert!(matches!(
            checker.user_exists("a@example.com"),
            Err(LoginError::Directory { .. })
        ));
    }
}
