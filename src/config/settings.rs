//! Configuration settings for the login checkers.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::auth::DigestAlgorithm;
use crate::error::LoginError;
use crate::validation::validate_login_type;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub directory: Option<DirectoryConfig>,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub digest: DigestConfig,
    /// Backends keyed by the login type accounts select them with.
    #[serde(default)]
    pub checkers: BTreeMap<String, CheckerConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Account store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the account preference file.
    pub path: PathBuf,
}

/// Directory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Path to the directory entries file.
    pub path: PathBuf,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Whether audit logging is enabled.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Path to the audit log file.
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

/// Default digest settings for digest checkers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DigestConfig {
    #[serde(default)]
    pub algorithm: DigestAlgorithm,
}

/// Backend kinds a login type can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckerKind {
    Directory,
    Digest,
}

/// One `[checkers.<login type>]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
    pub kind: CheckerKind,
    /// Overrides `[digest] algorithm` for this digest checker.
    #[serde(default)]
    pub algorithm: Option<DigestAlgorithm>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("/var/log/login-checker/audit.log")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            log_path: default_audit_log_path(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoginError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoginError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            LoginError::Config { message } => LoginError::Config {
                message: format!("Config file '{}': {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, LoginError> {
        let settings: Settings = toml::from_str(content).map_err(|e| LoginError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate the settings.
    fn validate(&self) -> Result<(), LoginError> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(LoginError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        // Validate log format
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(LoginError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        if self.checkers.is_empty() {
            return Err(LoginError::Config {
                message: "No login checkers configured".to_string(),
            });
        }

        for (login_type, checker) in &self.checkers {
            validate_login_type(login_type).map_err(|e| LoginError::Config {
                message: e.to_string(),
            })?;

            if checker.algorithm.is_some() && checker.kind != CheckerKind::Digest {
                return Err(LoginError::Config {
                    message: format!(
                        "Login type '{}': 'algorithm' only applies to digest checkers",
                        login_type
                    ),
                });
            }

            if checker.kind == CheckerKind::Directory && self.directory.is_none() {
                return Err(LoginError::Config {
                    message: format!(
                        "Login type '{}' uses the directory checker but [directory] is missing",
                        login_type
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[store]
path = "/etc/pootle/users.toml"

[checkers.digest]
kind = "digest"
"#;

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "pretty");
        assert!(default_audit_enabled());
    }

    #[test]
    fn test_minimal_config() {
        let settings = Settings::from_toml_str(MINIMAL).unwrap();
        assert_eq!(settings.logging.level, "info");
        assert!(settings.directory.is_none());
        assert!(settings.audit.enabled);
        assert_eq!(settings.digest.algorithm, DigestAlgorithm::Md5);
        assert_eq!(settings.checkers["digest"].kind, CheckerKind::Digest);
    }

    #[test]
    fn test_unknown_checker_kind_rejected() {
        let result = Settings::from_toml_str(
            "[store]\npath = \"/u\"\n\n[checkers.krb]\nkind = \"kerberos\"\n",
        );
        assert!(matches!(result, Err(LoginError::Config { .. })));
    }

    #[test]
    fn test_unknown_checker_field_rejected() {
        let result = Settings::from_toml_str(
            "[store]\npath = \"/u\"\n\n[checkers.digest]\nkind = \"digest\"\nalgo = \"md5\"\n",
        );
        assert!(matches!(result, Err(LoginError::Config { .. })));
    }

    #[test]
    fn test_no_checkers_rejected() {
        let result = Settings::from_toml_str("[store]\npath = \"/u\"\n");
        assert!(matches!(result, Err(LoginError::Config { .. })));
    }

    #[test]
    fn test_bad_login_type_rejected() {
        let result = Settings::from_toml_str(
            "[store]\npath = \"/u\"\n\n[checkers.Digest]\nkind = \"digest\"\n",
        );
        assert!(matches!(result, Err(LoginError::Config { .. })));
    }

    #[test]
    fn test_directory_checker_needs_directory() {
        let result = Settings::from_toml_str(
            "[store]\npath = \"/u\"\n\n[checkers.ldap]\nkind = \"directory\"\n",
        );
        assert!(matches!(result, Err(LoginError::Config { .. })));

        let settings = Settings::from_toml_str(
            "[store]\npath = \"/u\"\n\n[directory]\npath = \"/d\"\n\n[checkers.ldap]\nkind = \"directory\"\n",
        )
        .unwrap();
        assert_eq!(settings.checkers["ldap"].kind, CheckerKind::Directory);
    }

    #[test]
    fn test_algorithm_only_for_digest() {
        let result = Settings::from_toml_str(
            "[store]\npath = \"/u\"\n\n[directory]\npath = \"/d\"\n\n[checkers.ldap]\nkind = \"directory\"\nalgorithm = \"md5\"\n",
        );
        assert!(matches!(result, Err(LoginError::Config { .. })));
    }

    #[test]
    fn test_invalid_log_level() {
        let content = format!("[logging]\nlevel = \"loud\"\n{}", MINIMAL);
        assert!(Settings::from_toml_str(&content).is_err());
    }
}
