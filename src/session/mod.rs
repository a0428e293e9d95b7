//! Request boundary.
//!
//! [`Session`] carries the acting user; [`LoginService`] resolves the
//! effective username once, runs the check, and records it in the audit log.

mod principal;
mod service;

pub use principal::Session;
pub use service::LoginService;
