//! Username validation.
//!
//! Usernames are e-mail style identifiers for directory accounts or plain
//! names for local accounts, so only the structural rules are enforced here.

use crate::error::{LoginError, ValidationErrorKind};

/// Maximum length for usernames (the longest valid e-mail address).
const MAX_USERNAME_LENGTH: usize = 254;

fn invalid(username: &str, message: impl Into<String>) -> LoginError {
    LoginError::Validation {
        kind: ValidationErrorKind::InvalidUsername {
            username: username.to_string(),
            message: message.into(),
        },
    }
}

/// Validate a username.
///
/// Rules:
/// - Must not be empty
/// - Must not exceed 254 bytes
/// - Must not contain whitespace or control characters
///
/// # Errors
///
/// Returns a validation error naming the first rule that fails.
pub fn validate_username(username: &str) -> Result<&str, LoginError> {
    if username.is_empty() {
        return Err(invalid(username, "Username cannot be empty"));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(invalid(
            username,
            format!(
                "Username exceeds maximum length of {} bytes",
                MAX_USERNAME_LENGTH
            ),
        ));
    }

    if let Some(c) = username
        .chars()
        .find(|c| c.is_whitespace() || c.is_control())
    {
        return Err(invalid(
            username,
            format!("Username contains invalid character {:?}", c),
        ));
    }

    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a.b@example.com").is_ok());
        assert!(validate_username("user_name-123").is_ok());
        assert!(validate_username("Ünïcode").is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_too_long_username() {
        let long_name = "a".repeat(255);
        assert!(validate_username(&long_name).is_err());

        let exact_name = "a".repeat(254);
        assert!(validate_username(&exact_name).is_ok());
    }

    #[test]
    fn test_whitespace_and_control_characters() {
        assert!(validate_username("john doe").is_err());
        assert!(validate_username("john\tdoe").is_err());
        assert!(validate_username("john\n").is_err());
        assert!(validate_username("john\u{0}").is_err());
    }
}
