//! Credential checks applied before anything is sent upstream

use common::error::{UpstreamError, UpstreamResult};
use regex::Regex;
use std::sync::OnceLock;

/// Validate email shape only: one `@` with something on each side
///
/// Deliverability and domain rules are left to the auth service, so
/// addresses such as `alice@localhost` pass through.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("Failed to compile email regex"));

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password; strength rules belong to the auth service
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a sign-in attempt
pub fn validate_credentials(email: &str, password: &str) -> UpstreamResult<()> {
    validate_email(email)
        .and_then(|_| validate_password(password))
        .map_err(UpstreamError::ValidationFailure)
}
