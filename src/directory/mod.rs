//! Directory service clients.
//!
//! The directory checker talks to an identity directory (LDAP-style) through
//! the [`DirectoryClient`] trait. [`FileDirectory`] is a static,
//! file-backed directory for deployments without a directory server and for
//! tests.

mod file;
mod traits;

pub use file::{DirectoryEntry, FileDirectory};
pub use traits::DirectoryClient;
