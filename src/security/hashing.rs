//! SHA-256 password hashing
//!
//! The stored credential is the lowercase hex digest of the plaintext's
//! UTF-8 bytes. The digest is unsalted, which keeps `hash` a pure
//! deterministic function; authentication is a straight digest comparison.

use sha2::{Digest, Sha256};

/// Hash a plaintext password to its stored digest form.
pub fn hash_password(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

/// Verify a candidate password against a stored digest.
pub fn verify_password(candidate: &str, stored_digest: &str) -> bool {
    hash_password(candidate) == stored_digest
}
