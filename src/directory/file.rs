//! File-backed directory.
//!
//! Entries are listed in a TOML file:
//!
//! ```toml
//! [[entries]]
//! mail = "a.b@example.com"
//! secret_hash = "<sha256 hex of the password>"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::{digests_match, hash_password, DigestAlgorithm};
use crate::error::{LoginError, LoginResult};

use super::traits::DirectoryClient;

/// A single identity in the directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    /// Mail address the identity is looked up by.
    pub mail: String,
    /// SHA-256 hex digest of the bind password.
    pub secret_hash: String,
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    entries: Vec<DirectoryEntry>,
}

/// Static directory keyed by lowercase mail address.
#[derive(Debug, Clone, Default)]
pub struct FileDirectory {
    entries: HashMap<String, DirectoryEntry>,
}

impl FileDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a directory from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> LoginResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoginError::Directory {
            message: format!("Failed to read directory file '{}': {}", path.display(), e),
        })?;

        let file: DirectoryFile = toml::from_str(&content).map_err(|e| LoginError::Directory {
            message: format!("Failed to parse directory file '{}': {}", path.display(), e),
        })?;

        let mut directory = Self::new();
        for entry in file.entries {
            directory.insert(entry);
        }

        info!(
            path = %path.display(),
            entries = directory.len(),
            "Directory loaded"
        );

        Ok(directory)
    }

    /// Add an identity, replacing any entry with the same mail address.
    pub fn insert(&mut self, entry: DirectoryEntry) {
        self.entries.insert(entry.mail.to_lowercase(), entry);
    }

    /// Builder-style insert from a plaintext password.
    pub fn with_identity(mut self, mail: &str, password: &str) -> Self {
        self.insert(DirectoryEntry {
            mail: mail.to_string(),
            secret_hash: hash_password(DigestAlgorithm::Sha256, password),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, username: &str) -> Option<&DirectoryEntry> {
        self.entries.get(&username.to_lowercase())
    }
}

impl DirectoryClient for FileDirectory {
    fn has_account(&self, username: &str) -> LoginResult<bool> {
        Ok(self.lookup(username).is_some())
    }

    fn has_valid_credentials(&self, username: &str, password: &str) -> LoginResult<bool> {
        let Some(entry) = self.lookup(username) else {
            debug!(username, "Bind refused: no such identity");
            return Ok(false);
        };

        let candidate = hash_password(DigestAlgorithm::Sha256, password);
        Ok(digests_match(&entry.secret_hash, &candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let directory = FileDirectory::new().with_identity("A.B@Example.com", "pw");
        assert!(directory.has_account("a.b@example.com").unwrap());
        assert!(directory.has_account("A.B@EXAMPLE.COM").unwrap());
        assert!(!directory.has_account("c@example.com").unwrap());
    }

    #[test]
    fn test_credentials() {
        let directory = FileDirectory::new().with_identity("a@example.com", "pw");
        assert!(directory.has_valid_credentials("a@example.com", "pw").unwrap());
        assert!(!directory.has_valid_credentials("a@example.com", "PW").unwrap());
        assert!(!directory.has_valid_credentials("b@example.com", "pw").unwrap());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("directory.toml");
        let content = format!(
            "[[entries]]\nmail = \"a@example.com\"\nsecret_hash = \"{}\"\n",
            hash_password(DigestAlgorithm::Sha256, "pw")
        );
        std::fs::write(&path, content).unwrap();

        let directory = FileDirectory::load(&path).unwrap();
        assert_eq!(directory.len(), 1);
        assert!(directory.has_valid_credentials("a@example.com", "pw").unwrap());
    }

    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("directory.toml");
        std::fs::write(&path, "[[entries]]\nmail = 3\n").unwrap();

        assert!(matches!(
            FileDirectory::load(&path),
            Err(LoginError::Directory { .. })
        ));
    }
}
