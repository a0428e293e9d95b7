//! Login type name validation.

use crate::error::{LoginError, ValidationErrorKind};

/// Validate a login type (the `logintype` discriminator).
///
/// Login types are short lowercase identifiers such as `ldap` or `digest`:
/// lowercase ASCII letters, digits, underscores and hyphens.
pub fn validate_login_type(login_type: &str) -> Result<&str, LoginError> {
    if login_type.is_empty() {
        return Err(LoginError::Validation {
            kind: ValidationErrorKind::InvalidLoginType {
                login_type: login_type.to_string(),
                message: "Login type cannot be empty".to_string(),
            },
        });
    }

    for c in login_type.chars() {
        if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '_' && c != '-' {
            return Err(LoginError::Validation {
                kind: ValidationErrorKind::InvalidLoginType {
                    login_type: login_type.to_string(),
                    message: format!(
                        "Login type contains invalid character '{}'. Only lowercase letters, digits, underscores, and hyphens are allowed",
                        c
                    ),
                },
            });
        }
    }

    Ok(login_type)
}
