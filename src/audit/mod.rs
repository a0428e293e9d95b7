//! Audit logging module.
//!
//! Records every login check made through the request boundary.
//! Logs are written in JSON lines format for easy parsing by log analysis tools.
//!
//! ## Features
//!
//! - One structured entry per check with operation, username and outcome
//! - Passwords and digests are never recorded
//! - Thread-safe file writing with sync for durability

mod entry;
mod logger;

pub use entry::{AuditEntry, AuditResult, Operation};
pub use logger::{AuditLogger, AuditSink, NullAuditLogger};
