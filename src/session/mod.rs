//! Session and account lifecycle module

mod manager;
mod validation;

pub use manager::{RegisterRequest, SessionManager, EMAIL_OTP_DIGITS, SMS_OTP_DIGITS};
