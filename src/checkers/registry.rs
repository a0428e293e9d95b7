//! Checker registry.
//!
//! Maps login types to the backends that handle them. A registry is
//! assembled once through [`RegistryBuilder`] and never changes afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::config::{CheckerKind, Settings};
use crate::directory::DirectoryClient;
use crate::error::{LoginError, LoginResult};
use crate::store::AccountStore;
use crate::validation::validate_login_type;

use super::backend::Backend;
use super::digest::DigestChecker;
use super::directory::DirectoryChecker;
use super::traits::LoginChecker;

/// Immutable mapping from login type to backend.
#[derive(Clone, Default)]
pub struct CheckerRegistry {
    checkers: HashMap<String, Backend>,
}

/// Collects backends before freezing them into a [`CheckerRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    checkers: HashMap<String, Backend>,
}

impl RegistryBuilder {
    /// Register `backend` under `login_type`.
    ///
    /// Fails if the login type is malformed or already registered.
    pub fn register(mut self, login_type: &str, backend: impl Into<Backend>) -> LoginResult<Self> {
        validate_login_type(login_type)?;
        if self.checkers.contains_key(login_type) {
            return Err(LoginError::Config {
                message: format!("Login type '{}' registered twice", login_type),
            });
        }
        self.checkers.insert(login_type.to_string(), backend.into());
        Ok(self)
    }

    pub fn build(self) -> CheckerRegistry {
        let registry = CheckerRegistry {
            checkers: self.checkers,
        };

        info!(
            count = registry.count(),
            login_types = ?registry.login_types(),
            "Checker registry initialized"
        );

        registry
    }
}

impl CheckerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build the registry described by the `[checkers]` section.
    ///
    /// Digest checkers read from `store`; directory checkers require a
    /// `directory` client.
    pub fn from_settings(
        settings: &Settings,
        store: Arc<dyn AccountStore>,
        directory: Option<Arc<dyn DirectoryClient>>,
    ) -> LoginResult<Self> {
        let mut builder = Self::builder();

        for (login_type, config) in &settings.checkers {
            let backend: Backend = match config.kind {
                CheckerKind::Directory => {
                    let client = directory.clone().ok_or_else(|| LoginError::Config {
                        message: format!(
                            "Login type '{}' uses the directory checker but no directory is configured",
                            login_type
                        ),
                    })?;
                    DirectoryChecker::new(client).into()
                }
                CheckerKind::Digest => {
                    let algorithm = config.algorithm.unwrap_or(settings.digest.algorithm);
                    DigestChecker::new(Arc::clone(&store), algorithm).into()
                }
            };
            builder = builder.register(login_type, backend)?;
        }

        Ok(builder.build())
    }

    /// Get the backend registered for a login type.
    pub fn get(&self, login_type: &str) -> Option<&Backend> {
        self.checkers.get(login_type)
    }

    /// Whether a backend is registered for a login type.
    pub fn contains(&self, login_type: &str) -> bool {
        self.checkers.contains_key(login_type)
    }

    /// List all registered login types, sorted.
    pub fn login_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Get the count of registered backends.
    pub fn count(&self) -> usize {
        self.checkers.len()
    }

    /// Backend kind registered for each login type, sorted by login type.
    pub fn describe(&self) -> Vec<(&str, &'static str)> {
        self.login_types()
            .into_iter()
            .filter_map(|t| self.get(t).map(|b| (t, b.kind())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DigestAlgorithm;
    use crate::directory::FileDirectory;
    use crate::store::PrefsStore;

    fn store() -> Arc<dyn AccountStore> {
        Arc::new(PrefsStore::new())
    }

    #[test]
    fn test_registry_lookup() {
        let registry = CheckerRegistry::builder()
            .register(
                "ldap",
                DirectoryChecker::new(Arc::new(FileDirectory::new())),
            )
            .unwrap()
            .register("digest", DigestChecker::new(store(), DigestAlgorithm::Md5))
            .unwrap()
            .build();

        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get("ldap").map(|b| b.kind()), Some("directory"));
        assert_eq!(registry.get("digest").map(|b| b.kind()), Some("digest"));
        assert!(registry.get("kerberos").is_none());
        assert_eq!(registry.login_types(), vec!["digest", "ldap"]);
        assert_eq!(
            registry.describe(),
            vec![("digest", "digest"), ("ldap", "directory")]
        );
    }

    #[test]
    fn test_duplicate_login_type_rejected() {
        let result = CheckerRegistry::builder()
            .register("digest", DigestChecker::new(store(), DigestAlgorithm::Md5))
            .unwrap()
            .register("digest", DigestChecker::new(store(), DigestAlgorithm::Sha256));
        assert!(matches!(result, Err(LoginError::Config { .. })));
    }

    #[test]
    fn test_malformed_login_type_rejected() {
        let result = CheckerRegistry::builder()
            .register("Digest", DigestChecker::new(store(), DigestAlgorithm::Md5));
        assert!(matches!(result, Err(LoginError::Validation { .. })));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings::from_toml_str(
            r#"
[store]
path = "/tmp/users.toml"

[directory]
path = "/tmp/directory.toml"

[digest]
algorithm = "sha256"

[checkers.ldap]
kind = "directory"

[checkers.digest]
kind = "digest"

[checkers.legacy]
kind = "digest"
algorithm = "md5"
"#,
        )
        .unwrap();

        let directory: Arc<dyn DirectoryClient> = Arc::new(FileDirectory::new());
        let registry = CheckerRegistry::from_settings(&settings, store(), Some(directory)).unwrap();
        assert_eq!(registry.login_types(), vec!["digest", "ldap", "legacy"]);

        match registry.get("digest") {
            Some(Backend::Digest(checker)) => {
                assert_eq!(checker.algorithm(), DigestAlgorithm::Sha256)
            }
            _ => panic!("digest login type should map to a digest checker"),
        }
        match registry.get("legacy") {
            Some(Backend::Digest(checker)) => assert_eq!(checker.algorithm(), DigestAlgorithm::Md5),
            _ => panic!("legacy login type should map to a digest checker"),
        }
    }

    #[test]
    fn test_from_settings_directory_requires_client() {
        let settings = Settings::from_toml_str(
            "[store]\npath = \"/tmp/users.toml\"\n\n[directory]\npath = \"/tmp/d.toml\"\n\n[checkers.ldap]\nkind = \"directory\"\n",
        )
        .unwrap();

        let result = CheckerRegistry::from_settings(&settings, store(), None);
        assert!(matches!(result, Err(LoginError::Config { .. })));
    }
}
