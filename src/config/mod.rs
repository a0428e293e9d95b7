//! Configuration module.
//!
//! Handles loading and validating login checker configuration from TOML files.

mod settings;

pub use settings::*;
