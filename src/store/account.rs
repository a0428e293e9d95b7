//! Account keys and records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LoginError, LoginResult};

/// Token substituted for every `.` in a username when forming a store key.
pub const DOT_PLACEHOLDER: &str = "D0T";

/// Storage-safe key of an account record.
///
/// Two usernames that differ only in `.` versus a literal `D0T` map to the
/// same key; the store format leaves no way around that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey(String);

impl AccountKey {
    /// Normalize a username into its store key.
    pub fn from_username(username: &str) -> Self {
        Self(username.replace('.', DOT_PLACEHOLDER))
    }

    /// Accept a key read back from the store, which must already be normalized.
    pub fn from_stored(key: &str) -> LoginResult<Self> {
        if key.is_empty() {
            return Err(LoginError::Store {
                message: "Account key cannot be empty".to_string(),
            });
        }
        if key.contains('.') {
            return Err(LoginError::Store {
                message: format!(
                    "Account key '{}' contains '.'; store keys must use '{}' instead",
                    key, DOT_PLACEHOLDER
                ),
            });
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user's entry in the preference store.
///
/// Field names follow the preference file (`logintype`, `passwdhash`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Discriminator selecting the login checker for this user.
    #[serde(default, rename = "logintype", skip_serializing_if = "Option::is_none")]
    pub login_type: Option<String>,
    /// Precomputed password digest (lowercase hex).
    #[serde(default, rename = "passwdhash", skip_serializing_if = "Option::is_none")]
    pub password_digest: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AccountRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login_type(mut self, login_type: impl Into<String>) -> Self {
        self.login_type = Some(login_type.into());
        self
    }

    pub fn with_password_digest(mut self, digest: impl Into<String>) -> Self {
        self.password_digest = Some(digest.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
