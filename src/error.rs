//! Application error types

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the account/session core.
///
/// Every operation recovers at the [`crate::session::SessionManager`]
/// boundary and returns one of these; nothing panics across the
/// presentation seam.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("one-time code did not match")]
    OtpMismatch,

    #[error("one-time code prompt was cancelled")]
    OtpCancelled,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("no account registered for that email")]
    UnknownEmail,

    #[error("password too weak: {0}")]
    WeakPassword(String),

    #[error("an account already exists; sign in instead")]
    AccountExists,

    #[error("operation requires an active session")]
    NotLoggedIn,

    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AuthError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Serializable error response for the presentation layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::Validation { .. } => "VALIDATION_ERROR",
            AuthError::OtpMismatch => "OTP_MISMATCH",
            AuthError::OtpCancelled => "OTP_CANCELLED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UnknownEmail => "UNKNOWN_EMAIL",
            AuthError::WeakPassword(_) => "WEAK_PASSWORD",
            AuthError::AccountExists => "ACCOUNT_EXISTS",
            AuthError::NotLoggedIn => "NOT_LOGGED_IN",
            AuthError::Storage(_) => "STORAGE_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_codes() {
        let resp = ErrorResponse::from(AuthError::OtpMismatch);
        assert_eq!(resp.code, "OTP_MISMATCH");

        let resp = ErrorResponse::from(AuthError::validation("phone", "must be 10 digits"));
        assert_eq!(resp.code, "VALIDATION_ERROR");
        assert!(resp.message.contains("phone"));
    }
}
