//! Login checker trait.

use crate::error::LoginResult;

/// Verifies credentials for a user.
///
/// Every backend answers the same three questions. Usernames are always
/// passed explicitly; defaulting to a session's user happens before a
/// checker is called.
///
/// # Example
///
/// ```ignore
/// pub struct DenyAll;
///
/// impl LoginChecker for DenyAll {
///     fn kind(&self) -> &'static str { "deny" }
///     fn user_exists(&self, _username: &str) -> LoginResult<bool> { Ok(false) }
///     fn is_correct_password(&self, _password: &str, _username: &str) -> LoginResult<bool> {
///         Ok(false)
///     }
///     fn password_digest(&self, _username: &str) -> LoginResult<String> {
///         Err(LoginError::NotImplemented { checker: "deny", operation: "password digests" })
///     }
/// }
/// ```
pub trait LoginChecker: Send + Sync {
    /// Short backend identifier (e.g., "directory", "digest").
    fn kind(&self) -> &'static str;

    /// Whether `username` is known to this checker.
    fn user_exists(&self, username: &str) -> LoginResult<bool>;

    /// Whether `password` is the correct password for `username`.
    fn is_correct_password(&self, password: &str, username: &str) -> LoginResult<bool>;

    /// The stored one-way digest of the user's password.
    ///
    /// Backends that cannot expose digests return
    /// [`LoginError::NotImplemented`](crate::error::LoginError::NotImplemented).
    fn password_digest(&self, username: &str) -> LoginResult<String>;
}
