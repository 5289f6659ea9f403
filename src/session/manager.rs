//! Session manager: the authentication state machine
//!
//! Owns the one `LoggedOut`/`LoggedIn` session and the single account
//! record, and drives every credential-mutating flow: registration with
//! two OTP rounds, login, password reset/change, sign-out, and account
//! deletion. Constructed once at startup and shared by handle with the
//! idle watchdog; there is no ambient singleton.

use crate::error::{AuthError, Result};
use crate::security::{self, OtpChallenge, OtpChannel};
use crate::store::models::{Transaction, UserRecord};
use crate::store::CredentialStore;
use parking_lot::Mutex;
use serde::Deserialize;
use std::time::{Duration, Instant};

use super::validation;

/// Digit length of the email-style OTP round.
pub const EMAIL_OTP_DIGITS: u32 = 2;
/// Digit length of the SMS-style OTP round.
pub const SMS_OTP_DIGITS: u32 = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub dob: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

type ExpiryHook = Box<dyn Fn() + Send + Sync>;

struct SessionInner {
    logged_in: bool,
    last_activity: Instant,
    user: Option<UserRecord>,
}

/// Authentication state machine shared between the foreground and the
/// idle watchdog.
pub struct SessionManager {
    store: CredentialStore,
    otp_channel: Box<dyn OtpChannel>,
    inner: Mutex<SessionInner>,
    expiry_hook: Mutex<Option<ExpiryHook>>,
}

impl SessionManager {
    /// Create the session manager, loading any persisted account.
    /// Starts `LoggedOut`.
    pub fn new(store: CredentialStore, otp_channel: Box<dyn OtpChannel>) -> Self {
        let user = store.load();
        Self {
            store,
            otp_channel,
            inner: Mutex::new(SessionInner {
                logged_in: false,
                last_activity: Instant::now(),
                user,
            }),
            expiry_hook: Mutex::new(None),
        }
    }

    /// Register the account and log in.
    ///
    /// Validates every field, refuses if an account already exists, then
    /// runs the email-style and SMS-style OTP rounds. Nothing is persisted
    /// or changed in memory until every step has passed.
    pub fn register(&self, request: RegisterRequest) -> Result<()> {
        tracing::info!("Registration attempt for {}", request.email);

        validation::validate_registration(
            &request.name,
            &request.dob,
            &request.email,
            &request.password,
            &request.phone,
        )?;

        if self.inner.lock().user.is_some() {
            return Err(AuthError::AccountExists);
        }

        self.run_otp_round(EMAIL_OTP_DIGITS)?;
        self.run_otp_round(SMS_OTP_DIGITS)?;

        let record = UserRecord {
            name: request.name,
            dob: request.dob,
            email: request.email,
            password_hash: security::hash_password(&request.password),
            phone: request.phone,
            transactions: Vec::new(),
        };

        // Persist before committing to memory so a storage failure leaves
        // no trace of the registration.
        self.store.save(&record)?;

        let mut inner = self.inner.lock();
        inner.user = Some(record);
        inner.logged_in = true;
        inner.last_activity = Instant::now();

        tracing::info!("Registration complete, session active");
        Ok(())
    }

    /// Log in with email and password.
    pub fn login(&self, email: &str, password: &str) -> Result<()> {
        let mut inner = self.inner.lock();

        let matches = inner
            .user
            .as_ref()
            .map(|u| u.email == email && security::verify_password(password, &u.password_hash))
            .unwrap_or(false);
        if !matches {
            tracing::info!("Failed login attempt for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        inner.logged_in = true;
        inner.last_activity = Instant::now();
        tracing::info!("User {} logged in", email);
        Ok(())
    }

    /// Reset the password after one email-style OTP round.
    ///
    /// The session state is left as-is: a reset does not log the user in.
    pub fn request_password_reset(&self, email: &str, new_password: &str) -> Result<()> {
        {
            let inner = self.inner.lock();
            let known = inner.user.as_ref().map(|u| u.email == email).unwrap_or(false);
            if !known {
                return Err(AuthError::UnknownEmail);
            }
        }

        self.run_otp_round(EMAIL_OTP_DIGITS)?;

        // The reset flow only enforces the length floor, unlike the
        // register/change strength rule.
        if new_password.len() < 6 {
            return Err(AuthError::WeakPassword(
                "must be at least 6 characters".to_string(),
            ));
        }

        let mut inner = self.inner.lock();
        let Some(record) = inner.user.as_ref() else {
            return Err(AuthError::UnknownEmail);
        };
        let mut updated = record.clone();
        updated.password_hash = security::hash_password(new_password);

        self.store.save(&updated)?;
        inner.user = Some(updated);

        tracing::info!("Password reset for {}", email);
        Ok(())
    }

    /// Change the password of the active account.
    pub fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        let mut inner = self.inner.lock();

        let Some(record) = inner.user.as_ref() else {
            return Err(AuthError::InvalidCredentials);
        };
        if !security::verify_password(old_password, &record.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        if let Err(reason) = validation::password_strength(new_password) {
            return Err(AuthError::WeakPassword(reason));
        }

        let mut updated = record.clone();
        updated.password_hash = security::hash_password(new_password);

        self.store.save(&updated)?;
        inner.user = Some(updated);

        tracing::info!("Password changed");
        Ok(())
    }

    /// End the session. Always succeeds; no persistence change.
    pub fn sign_out(&self) {
        let mut inner = self.inner.lock();
        inner.logged_in = false;
        tracing::info!("User signed out");
    }

    /// Erase the account entirely and end the session.
    ///
    /// Confirmation prompts are the presentation layer's concern; by the
    /// time this is called the decision has been made.
    pub fn delete_account(&self) -> Result<()> {
        self.store.delete()?;

        let mut inner = self.inner.lock();
        inner.user = None;
        inner.logged_in = false;

        tracing::info!("Account deleted");
        Ok(())
    }

    /// Reset the idle clock. Called by presentation on every
    /// user-initiated action.
    pub fn record_activity(&self) {
        self.inner.lock().last_activity = Instant::now();
    }

    /// Append a trade to the transaction log and persist it.
    pub fn append_transaction(&self, tx: Transaction) -> Result<()> {
        if tx.shares <= 0 {
            return Err(AuthError::validation("shares", "must be positive"));
        }
        if !tx.price.is_finite() || tx.price <= 0.0 {
            return Err(AuthError::validation("price", "must be positive"));
        }

        let mut inner = self.inner.lock();
        if !inner.logged_in {
            return Err(AuthError::NotLoggedIn);
        }
        let Some(record) = inner.user.as_ref() else {
            return Err(AuthError::NotLoggedIn);
        };

        let mut updated = record.clone();
        updated.transactions.push(tx);

        self.store.save(&updated)?;
        inner.user = Some(updated);
        Ok(())
    }

    /// The current account record, if one exists.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.inner.lock().user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.lock().logged_in
    }

    /// Register the callback fired when the watchdog expires the session.
    pub fn on_session_expired(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.expiry_hook.lock() = Some(Box::new(hook));
    }

    /// Force a sign-out if the session has been idle past `threshold`.
    ///
    /// Called from the watchdog tick. Returns whether the session was
    /// expired; the expiry hook runs outside the session lock.
    pub fn expire_if_idle(&self, threshold: Duration) -> bool {
        let expired = {
            let mut inner = self.inner.lock();
            if inner.logged_in && inner.last_activity.elapsed() > threshold {
                inner.logged_in = false;
                true
            } else {
                false
            }
        };

        if expired {
            tracing::info!("Session expired after inactivity");
            if let Some(hook) = &*self.expiry_hook.lock() {
                hook();
            }
        }
        expired
    }

    fn run_otp_round(&self, digits: u32) -> Result<()> {
        let challenge = OtpChallenge::issue(digits);
        let response = self
            .otp_channel
            .prompt(challenge.code(), digits)
            .ok_or(AuthError::OtpCancelled)?;
        if challenge.verify(&response) {
            Ok(())
        } else {
            Err(AuthError::OtpMismatch)
        }
    }
}
