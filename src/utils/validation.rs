//! Validation Utilities
//!
//! Input validation functions for user data and API requests.

use regex::Regex;
use std::sync::OnceLock;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::utils::error::AppError;

/// Usernames that can never be registered
pub const RESERVED_USERNAMES: &[&str] = &[
    "admin", "root", "api", "system", "support", "help", "about", "login", "signup", "settings",
    "profile", "me",
];

/// Validates username shape: 3-20 characters, letters, digits, and underscores
pub fn validate_username(username: &str) -> bool {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("Failed to compile username regex")
    });

    regex.is_match(username)
}

/// Checks whether a username is in the reserved list (case-insensitive)
pub fn is_reserved_username(username: &str) -> bool {
    let lowered = username.to_lowercase();
    RESERVED_USERNAMES.contains(&lowered.as_str())
}

/// Validates URL format for avatars and social links
pub fn validate_url(url: &str) -> bool {
    if url.is_empty() {
        return true; // Empty URLs are allowed for optional fields
    }

    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = URL_REGEX.get_or_init(|| {
        Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("Failed to compile URL regex")
    });

    regex.is_match(url) && url.len() <= 512
}

/// Custom validator for username fields using the validator crate
pub fn username_validator(username: &str) -> Result<(), ValidationError> {
    if !validate_username(username.trim()) {
        let mut error = ValidationError::new("invalid_username");
        error.message = Some(
            "Username must be 3-20 characters of letters, numbers, and underscores".into(),
        );
        return Err(error);
    }

    if is_reserved_username(username.trim()) {
        let mut error = ValidationError::new("reserved_username");
        error.message = Some("This username is reserved".into());
        return Err(error);
    }

    Ok(())
}

/// Custom validator for URL fields using the validator crate
pub fn url_validator(url: &str) -> Result<(), ValidationError> {
    if validate_url(url) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_url");
        error.message = Some("Must be a valid URL".into());
        Err(error)
    }
}

/// Convert validator errors to an [`AppError::Validation`] surfacing the
/// first failing field as `'<field>' field: <message>.`
pub fn validation_error(errors: ValidationErrors) -> AppError {
    AppError::Validation(first_failure(&errors, None))
}

fn first_failure(errors: &ValidationErrors, prefix: Option<&str>) -> String {
    // Field order within ValidationErrors is not guaranteed; any failing
    // field satisfies the "first failure" contract.
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(error) = field_errors.first() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", error.code));
                    return format!("'{}' field: {}.", path, message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                return first_failure(nested, Some(&path));
            }
            ValidationErrorsKind::List(items) => {
                if let Some((_, nested)) = items.iter().next() {
                    return first_failure(nested, Some(&path));
                }
            }
        }
    }
    "invalid request".to_string()
}
