//! Login Checker Library
//!
//! This crate decides how a user's credentials are verified. Each account in
//! the preference store names a login type, and the dispatching checker
//! forwards existence checks, password checks and digest lookups to the
//! backend registered for that type: a directory bind or a local digest
//! comparison.

pub mod audit;
pub mod auth;
pub mod checkers;
pub mod config;
pub mod directory;
pub mod error;
pub mod session;
pub mod store;
pub mod validation;
