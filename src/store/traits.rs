//! Account store trait.

use crate::error::LoginResult;

use super::account::{AccountKey, AccountRecord};

/// Read access to per-user account records.
///
/// Absence of a record is `Ok(None)`; `Err` is reserved for failures of the
/// store itself.
pub trait AccountStore: Send + Sync {
    /// Look up the account record stored under `key`.
    fn find_account(&self, key: &AccountKey) -> LoginResult<Option<AccountRecord>>;

    /// List the keys of every stored account.
    fn account_keys(&self) -> LoginResult<Vec<AccountKey>>;
}
