//! Preference-file account store.
//!
//! The preference file is TOML with one table per account, keyed by the
//! normalized username:
//!
//! ```toml
//! [alice]
//! logintype = "digest"
//! passwdhash = "2ab96390c7dbe3439de74d0c9b0b1767"
//!
//! ["aD0Tb@exampleD0Tcom"]
//! logintype = "ldap"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{LoginError, LoginResult};

use super::account::{AccountKey, AccountRecord};
use super::traits::AccountStore;

/// In-memory account store, usually loaded from a preference file.
#[derive(Debug, Clone, Default)]
pub struct PrefsStore {
    accounts: HashMap<AccountKey, AccountRecord>,
}

impl PrefsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load accounts from a preference file.
    pub fn load<P: AsRef<Path>>(path: P) -> LoginResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoginError::Store {
            message: format!("Failed to read preference file '{}': {}", path.display(), e),
        })?;

        let store = Self::from_toml_str(&content).map_err(|e| LoginError::Store {
            message: format!("Invalid preference file '{}': {}", path.display(), e),
        })?;

        info!(
            path = %path.display(),
            accounts = store.len(),
            "Account store loaded"
        );

        Ok(store)
    }

    /// Parse accounts from preference-file text.
    pub fn from_toml_str(content: &str) -> LoginResult<Self> {
        let raw: BTreeMap<String, AccountRecord> =
            toml::from_str(content).map_err(|e| LoginError::Store {
                message: e.to_string(),
            })?;

        let mut accounts = HashMap::with_capacity(raw.len());
        for (key, record) in raw {
            accounts.insert(AccountKey::from_stored(&key)?, record);
        }

        Ok(Self { accounts })
    }

    /// Add or replace the account for `username`.
    pub fn insert(&mut self, username: &str, record: AccountRecord) {
        let key = AccountKey::from_username(username);
        debug!(key = %key, "Account stored");
        self.accounts.insert(key, record);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_account(mut self, username: &str, record: AccountRecord) -> Self {
        self.insert(username, record);
        self
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for PrefsStore {
    fn find_account(&self, key: &AccountKey) -> LoginResult<Option<AccountRecord>> {
        Ok(self.accounts.get(key).cloned())
    }

    fn account_keys(&self) -> LoginResult<Vec<AccountKey>> {
        let mut keys: Vec<AccountKey> = self.accounts.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
