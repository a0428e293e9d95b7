//! Dispatching login checker.
//!
//! Looks up the user's account, reads its `logintype`, and forwards the call
//! to the backend registered for that login type.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::directory::{DirectoryClient, FileDirectory};
use crate::error::{LoginError, LoginResult, LookupErrorKind};
use crate::store::{AccountKey, AccountRecord, AccountStore, PrefsStore};

use super::backend::Backend;
use super::registry::CheckerRegistry;
use super::traits::LoginChecker;

/// Selects a backend per user from the account's login type.
///
/// The registry is fixed before the checker exists, so a checker can be
/// nested inside another registry but never inside its own.
pub struct ProgressiveChecker {
    store: Arc<dyn AccountStore>,
    registry: Arc<CheckerRegistry>,
}

/// An account that cannot be routed to any backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProblem {
    pub key: AccountKey,
    pub kind: ProblemKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemKind {
    /// The account has no `logintype`.
    MissingLoginType,
    /// The account's `logintype` has no registered backend.
    UnregisteredLoginType(String),
}

impl fmt::Display for AccountProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProblemKind::MissingLoginType => write!(f, "{}: no login type listed", self.key),
            ProblemKind::UnregisteredLoginType(login_type) => write!(
                f,
                "{}: login type '{}' has no login checker",
                self.key, login_type
            ),
        }
    }
}

impl ProgressiveChecker {
    pub fn new(store: Arc<dyn AccountStore>, registry: Arc<CheckerRegistry>) -> Self {
        Self { store, registry }
    }

    /// Load the account store and directory named in `settings` and build
    /// the registry over them.
    pub fn from_settings(settings: &Settings) -> LoginResult<Self> {
        let store: Arc<dyn AccountStore> = Arc::new(PrefsStore::load(&settings.store.path)?);

        let directory: Option<Arc<dyn DirectoryClient>> = match &settings.directory {
            Some(config) => Some(Arc::new(FileDirectory::load(&config.path)?)),
            None => None,
        };

        let registry = CheckerRegistry::from_settings(settings, Arc::clone(&store), directory)?;
        Ok(Self::new(store, Arc::new(registry)))
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    /// Look up the account for `username`; `None` when there is none.
    pub fn find_account(&self, username: &str) -> LoginResult<Option<AccountRecord>> {
        let key = AccountKey::from_username(username);
        debug!(username, key = %key, "Looking up account");
        self.store.find_account(&key)
    }

    fn account(&self, username: &str) -> LoginResult<AccountRecord> {
        self.find_account(username)?
            .ok_or_else(|| LoginError::no_such_user(username))
    }

    /// Resolve the login type and backend that handle `username`.
    pub fn resolve(&self, username: &str) -> LoginResult<(String, &Backend)> {
        let account = self.account(username)?;

        let login_type = account.login_type.ok_or_else(|| LoginError::Lookup {
            kind: LookupErrorKind::MissingAttribute {
                username: username.to_string(),
                attribute: "logintype",
            },
        })?;

        let backend = self
            .registry
            .get(&login_type)
            .ok_or_else(|| LoginError::Lookup {
                kind: LookupErrorKind::NoSuchLoginChecker {
                    username: username.to_string(),
                    login_type: login_type.clone(),
                },
            })?;

        debug!(
            username,
            login_type = %login_type,
            backend = backend.kind(),
            "Resolved login checker"
        );

        Ok((login_type, backend))
    }

    /// Find every stored account that [`resolve`](Self::resolve) would reject
    /// for configuration reasons.
    pub fn audit_accounts(&self) -> LoginResult<Vec<AccountProblem>> {
        let mut problems = Vec::new();

        for key in self.store.account_keys()? {
            let Some(account) = self.store.find_account(&key)? else {
                continue;
            };

            let kind = match account.login_type {
                None => ProblemKind::MissingLoginType,
                Some(login_type) if !self.registry.contains(&login_type) => {
                    ProblemKind::UnregisteredLoginType(login_type)
                }
                Some(_) => continue,
            };

            let problem = AccountProblem { key, kind };
            warn!(problem = %problem, "Account cannot be routed to a login checker");
            problems.push(problem);
        }

        Ok(problems)
    }
}

impl LoginChecker for ProgressiveChecker {
    fn kind(&self) -> &'static str {
        "progressive"
    }

    fn user_exists(&self, username: &str) -> LoginResult<bool> {
        Ok(self.find_account(username)?.is_some())
    }

    fn is_correct_password(&self, password: &str, username: &str) -> LoginResult<bool> {
        let backend = match self.resolve(username) {
            Ok((_, backend)) => backend,
            Err(e) if e.is_no_such_user() => {
                debug!(username, "Password check for user without account");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };
        backend.is_correct_password(password, username)
    }

    fn password_digest(&self, username: &str) -> LoginResult<String> {
        let (_, backend) = self.resolve(username)?;
        backend.password_digest(username)
    }
}
