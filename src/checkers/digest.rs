//! Local digest login checker.

use std::sync::Arc;

use tracing::debug;

use crate::auth::{digests_match, hash_password, DigestAlgorithm};
use crate::error::{LoginError, LoginResult, LookupErrorKind};
use crate::store::{AccountKey, AccountRecord, AccountStore};

use super::traits::LoginChecker;

/// Checks passwords against digests kept in the account store.
#[derive(Clone)]
pub struct DigestChecker {
    store: Arc<dyn AccountStore>,
    algorithm: DigestAlgorithm,
}

impl DigestChecker {
    pub fn new(store: Arc<dyn AccountStore>, algorithm: DigestAlgorithm) -> Self {
        Self { store, algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    fn account(&self, username: &str) -> LoginResult<AccountRecord> {
        self.store
            .find_account(&AccountKey::from_username(username))?
            .ok_or_else(|| LoginError::no_such_user(username))
    }
}

impl LoginChecker for DigestChecker {
    fn kind(&self) -> &'static str {
        "digest"
    }

    fn user_exists(&self, username: &str) -> LoginResult<bool> {
        Ok(self
            .store
            .find_account(&AccountKey::from_username(username))?
            .is_some())
    }

    fn is_correct_password(&self, password: &str, username: &str) -> LoginResult<bool> {
        let stored = match self.password_digest(username) {
            Ok(stored) => stored,
            Err(e) if e.is_no_such_user() => {
                debug!(username, "Digest check for unknown user");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        let candidate = hash_password(self.algorithm, password);
        Ok(digests_match(&stored, &candidate))
    }

    fn password_digest(&self, username: &str) -> LoginResult<String> {
        self.account(username)?
            .password_digest
            .ok_or_else(|| LoginError::Lookup {
                kind: LookupErrorKind::MissingAttribute {
                    username: username.to_string(),
                    attribute: "passwdhash",
                },
            })
    }
}
