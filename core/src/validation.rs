//! Input checks applied before a user record is created or renamed.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::NewUser;

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the
/// domain part.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Trim and check a display name.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// Trim and check both fields of a new user.
pub fn validate_new_user(name: &str, email: &str) -> Result<NewUser, ValidationError> {
    let name = validate_name(name)?;
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(NewUser {
        name,
        email: email.to_string(),
    })
}
