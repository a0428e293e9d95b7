//! Directory client trait.

use crate::error::LoginResult;

/// Client for an external identity directory.
///
/// Implementations own their connection handling; timeouts and retries are
/// theirs to apply. A lookup failure is an `Err`, never a `false`.
///
/// # Example
///
/// ```ignore
/// pub struct LdapClient { /* connection settings */ }
///
/// impl DirectoryClient for LdapClient {
///     fn has_account(&self, username: &str) -> LoginResult<bool> {
///         // search for an entry whose mail attribute equals `username`
///     }
///
///     fn has_valid_credentials(&self, username: &str, password: &str) -> LoginResult<bool> {
///         // resolve the entry's DN and attempt a simple bind with `password`
///     }
/// }
/// ```
pub trait DirectoryClient: Send + Sync {
    /// Whether the directory has an identity for `username` (an e-mail address).
    fn has_account(&self, username: &str) -> LoginResult<bool>;

    /// Whether binding as `username` with `password` succeeds.
    fn has_valid_credentials(&self, username: &str, password: &str) -> LoginResult<bool>;
}
