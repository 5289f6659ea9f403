//! Security module for password hashing and one-time code challenges

mod hashing;
mod otp;

pub use hashing::{hash_password, verify_password};
pub use otp::{OtpChallenge, OtpChannel};
