//! Input validation helpers
//!
//! Centralized text length rules for the owner-facing CRUD surface.
//! The minimums mirror the signup form rules (password ≥ 6, username ≥ 6,
//! phone exactly 10 digits); the maximums are sanity caps since the store
//! does not enforce text length.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Display names (owner name, restaurant name, menu item name)
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Usernames
pub const MIN_USERNAME_LEN: usize = 6;
pub const MAX_USERNAME_LEN: usize = 100;

/// Phone numbers: exactly 10 characters per the signup contract
pub const PHONE_LEN: usize = 10;

/// Street addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Free-form notes (table requests etc.)
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Password rule: at least 6 characters
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password is too long (max {MAX_PASSWORD_LEN} characters)"
        )));
    }
    Ok(())
}

/// Username rule: at least 6 characters
pub fn validate_username(username: &str) -> Result<(), AppError> {
    validate_required_text(username, "Username", MAX_USERNAME_LEN)?;
    if username.len() < MIN_USERNAME_LEN {
        return Err(AppError::validation(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Phone rule: exactly 10 characters
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    if phone.len() != PHONE_LEN {
        return Err(AppError::validation(format!(
            "Phone number must be {PHONE_LEN} characters"
        )));
    }
    Ok(())
}

/// Minimal email shape check: `local@domain` with non-empty halves
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "Email", MAX_EMAIL_LEN)?;
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_minimum_is_six() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn phone_must_be_exactly_ten() {
        assert!(validate_phone("123456789").is_err());
        assert!(validate_phone("12345678901").is_err());
        assert!(validate_phone("1234567890").is_ok());
    }

    #[test]
    fn username_minimum_is_six() {
        assert!(validate_username("bob").is_err());
        assert!(validate_username("bobby1").is_ok());
    }

    #[test]
    fn email_needs_local_and_domain() {
        assert!(validate_email("nodomain@").is_err());
        assert!(validate_email("@nolocal.com").is_err());
        assert!(validate_email("plain").is_err());
        assert!(validate_email("owner@example.com").is_ok());
    }
}
