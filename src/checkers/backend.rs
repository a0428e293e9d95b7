//! Registered backend variants.

use std::sync::Arc;

use crate::error::LoginResult;

use super::digest::DigestChecker;
use super::directory::DirectoryChecker;
use super::progressive::ProgressiveChecker;
use super::traits::LoginChecker;

/// A login checker that can be registered under a login type.
#[derive(Clone)]
pub enum Backend {
    /// Directory lookup and bind.
    Directory(DirectoryChecker),
    /// Local digest comparison.
    Digest(DigestChecker),
    /// A nested dispatcher with its own store and registry.
    Progressive(Arc<ProgressiveChecker>),
}

impl Backend {
    fn checker(&self) -> &dyn LoginChecker {
        match self {
            Backend::Directory(checker) => checker,
            Backend::Digest(checker) => checker,
            Backend::Progressive(checker) => checker.as_ref(),
        }
    }
}

impl From<DirectoryChecker> for Backend {
    fn from(checker: DirectoryChecker) -> Self {
        Backend::Directory(checker)
    }
}

impl From<DigestChecker> for Backend {
    fn from(checker: DigestChecker) -> Self {
        Backend::Digest(checker)
    }
}

impl From<ProgressiveChecker> for Backend {
    fn from(checker: ProgressiveChecker) -> Self {
        Backend::Progressive(Arc::new(checker))
    }
}

impl LoginChecker for Backend {
    fn kind(&self) -> &'static str {
        self.checker().kind()
    }

    fn user_exists(&self, username: &str) -> LoginResult<bool> {
        self.checker().user_exists(username)
    }

    fn is_correct_password(&self, password: &str, username: &str) -> LoginResult<bool> {
        self.checker().is_correct_password(password, username)
    }

    fn password_digest(&self, username: &str) -> LoginResult<String> {
        self.checker().password_digest(username)
    }
}
