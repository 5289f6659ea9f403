//! PaperTrade Desktop - demo trading platform core
//!
//! The account and session lifecycle for a single-user paper-trading
//! desktop app: registration with simulated two-factor verification,
//! credential hashing, password reset/change, transaction log
//! persistence, and an idle-timeout watchdog that runs alongside the
//! foreground. The GUI is an external collaborator that drives the
//! [`session::SessionManager`] operation surface and renders results.

pub mod error;
pub mod scheduler;
pub mod security;
pub mod session;
pub mod store;

pub use error::{AuthError, ErrorResponse, Result};
pub use scheduler::{IdleWatchdog, WatchdogHandle};
pub use security::OtpChannel;
pub use session::{RegisterRequest, SessionManager};
pub use store::models::{Transaction, UserRecord};
pub use store::CredentialStore;
