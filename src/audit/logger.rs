//! Audit logger for writing audit entries to file.
//!
//! Writes structured audit entries as JSON lines (one JSON object per line).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{LoginError, LoginResult};

use super::entry::AuditEntry;

/// Destination for audit entries.
pub trait AuditSink: Send + Sync {
    fn log(&self, entry: &AuditEntry) -> LoginResult<()>;
}

/// Logger for audit entries.
///
/// Writes audit entries to a file in JSON lines format.
/// Thread-safe via internal mutex.
pub struct AuditLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl AuditLogger {
    /// Create a new audit logger that appends to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory cannot be created
    /// - File cannot be opened for appending
    pub fn new(path: &Path) -> LoginResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                debug!(path = %parent.display(), "Creating audit log directory");
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        debug!(path = %path.display(), "Audit logger initialized");

        Ok(Self {
            file: Mutex::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the audit log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for AuditLogger {
    /// Serialize the entry to JSON and append it as a single line.
    fn log(&self, entry: &AuditEntry) -> LoginResult<()> {
        let json = serde_json::to_string(entry)?;

        let mut file = self.file.lock().map_err(|e| {
            LoginError::Io(std::io::Error::other(format!(
                "Failed to acquire audit log lock: {}",
                e
            )))
        })?;

        writeln!(file, "{}", json)?;

        if let Err(e) = file.sync_data() {
            warn!(error = %e, "Failed to sync audit log");
        }

        debug!(
            attempt_id = %entry.attempt_id,
            operation = entry.operation.as_str(),
            "Audit entry logged"
        );

        Ok(())
    }
}

/// A no-op audit logger for testing or when audit logging is disabled.
#[derive(Debug, Default)]
pub struct NullAuditLogger;

impl NullAuditLogger {
    pub fn new() -> Self {
        Self
    }
}

impl AuditSink for NullAuditLogger {
    fn log(&self, _entry: &AuditEntry) -> LoginResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditResult, Operation};
    use std::io::Read;
    use tempfile::TempDir;

    fn create_test_entry() -> AuditEntry {
        AuditEntry::new(
            Operation::VerifyPassword,
            "alice",
            AuditResult::outcome(true),
            10,
        )
    }

    #[test]
    fn test_logger_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("subdir/audit.log");

        let logger = AuditLogger::new(&log_path).unwrap();
        assert!(log_path.parent().unwrap().exists());
        assert_eq!(logger.path(), log_path);
    }

    #[test]
    fn test_logger_writes_json_lines() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");

        let logger = AuditLogger::new(&log_path).unwrap();
        logger.log(&create_test_entry()).unwrap();
        logger
            .log(&AuditEntry::new(
                Operation::PasswordDigest,
                "bob",
                AuditResult::Failure {
                    error_code: "NO_SUCH_USER".to_string(),
                    error_message: "Given username (bob) has no account".to_string(),
                },
                1,
            ))
            .unwrap();

        let mut content = String::new();
        File::open(&log_path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed1: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed1["operation"], "verify_password");
        assert_eq!(parsed1["result"]["status"], "success");
        assert_eq!(parsed1["result"]["outcome"], true);

        let parsed2: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed2["username"], "bob");
        assert_eq!(parsed2["result"]["status"], "failure");
        assert_eq!(parsed2["result"]["error_code"], "NO_SUCH_USER");
    }

    #[test]
    fn test_logger_appends_to_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");

        {
            let logger = AuditLogger::new(&log_path).unwrap();
            logger.log(&create_test_entry()).unwrap();
        }
        {
            let logger = AuditLogger::new(&log_path).unwrap();
            logger.log(&create_test_entry()).unwrap();
        }

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_poisoned_lock_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(&temp_dir.path().join("audit.log")).unwrap();

        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = logger.file.lock().unwrap();
                    panic!("writer died holding the lock");
                })
                .join();
        });
        assert!(logger.file.is_poisoned());

        let err = logger.log(&create_test_entry()).unwrap_err();
        assert!(matches!(err, LoginError::Io(_)));
        assert_eq!(err.code(), "IO_ERROR");
    }

    #[test]
    fn test_null_logger() {
        let logger = NullAuditLogger::new();
        assert!(logger.log(&create_test_entry()).is_ok());
    }
}
