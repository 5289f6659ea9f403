//! Registration field validation

use crate::error::{AuthError, Result};
use chrono::NaiveDate;

/// Validate every registration field, reporting the first failure.
pub fn validate_registration(
    name: &str,
    dob: &str,
    email: &str,
    password: &str,
    phone: &str,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AuthError::validation("name", "must not be empty"));
    }
    if !is_valid_dob(dob) {
        return Err(AuthError::validation(
            "dob",
            "must be a valid date in YYYY-MM-DD format",
        ));
    }
    if !is_valid_email(email) {
        return Err(AuthError::validation(
            "email",
            "must look like local@domain.tld",
        ));
    }
    if let Err(reason) = password_strength(password) {
        return Err(AuthError::validation("password", reason));
    }
    if !is_valid_phone(phone) {
        return Err(AuthError::validation("phone", "must be exactly 10 digits"));
    }
    Ok(())
}

/// Strength rule shared by registration and password change:
/// at least 6 characters with both a letter and a digit.
pub fn password_strength(password: &str) -> std::result::Result<(), String> {
    if password.len() < 6 {
        return Err("must be at least 6 characters".to_string());
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err("must contain at least one letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("must contain at least one digit".to_string());
    }
    Ok(())
}

/// `YYYY-MM-DD`, digits in the right places, and a real calendar date.
fn is_valid_dob(dob: &str) -> bool {
    let bytes = dob.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
    {
        return false;
    }
    NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_ok()
}

/// Simple `local@domain.tld` shape: one `@`, non-empty local part, and a
/// dotted domain with non-empty host and TLD labels.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}
