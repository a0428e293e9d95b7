//! Input validation module.
//!
//! Provides validators for usernames and login type names.

mod login_type;
mod username;

pub use login_type::validate_login_type;
pub use username::validate_username;
