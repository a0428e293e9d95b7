//! Error types for the login checkers.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
