//! One-time code challenges for simulated two-factor verification
//!
//! A challenge is issued fresh for each verification step and consumed by
//! exactly one `verify` call. The core never transmits the code anywhere:
//! delivery is the presentation layer's concern, injected through
//! [`OtpChannel`].

use rand::Rng;

/// A single-use numeric verification challenge.
#[derive(Debug)]
pub struct OtpChallenge {
    code: String,
}

impl OtpChallenge {
    /// Issue a fresh challenge with a uniformly random code of exactly
    /// `digits` decimal digits. Leading zeros are allowed.
    pub fn issue(digits: u32) -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..digits)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        Self { code }
    }

    /// The issued code, for handing to the delivery channel.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn digits(&self) -> u32 {
        self.code.len() as u32
    }

    /// Verify the user's response. Exact string equality, no
    /// normalization; consumes the challenge so it cannot be retried.
    pub fn verify(self, response: &str) -> bool {
        self.code == response
    }
}

/// Delivery stand-in for the out-of-band OTP channel.
///
/// The presentation layer displays the code to the user (in place of a
/// real email/SMS hop) and synchronously collects their response.
/// Returning `None` means the user cancelled the prompt.
pub trait OtpChannel: Send + Sync {
    fn prompt(&self, code: &str, digits: u32) -> Option<String>;
}

impl<T: OtpChannel + ?Sized> OtpChannel for std::sync::Arc<T> {
    fn prompt(&self, code: &str, digits: u32) -> Option<String> {
        (**self).prompt(code, digits)
    }
}
