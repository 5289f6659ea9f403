//! Idle-timeout watchdog
//!
//! Polls the session on a fixed interval and forces a sign-out once the
//! idle threshold is exceeded. The watchdog is the only background task
//! in the process; it shares the session manager by `Arc` and performs
//! the same sign-out transition the foreground could. `start` returns a
//! handle whose `shutdown` (or drop) stops the thread deterministically
//! instead of leaving a detached loop behind.

use crate::session::SessionManager;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// How often the watchdog checks the idle clock.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Inactivity span after which a logged-in session is expired.
const DEFAULT_IDLE_THRESHOLD: Duration = Duration::from_secs(300);

/// Background watchdog that expires idle sessions
pub struct IdleWatchdog {
    session: Arc<SessionManager>,
    poll_interval: Duration,
    idle_threshold: Duration,
}

impl IdleWatchdog {
    /// Create a watchdog with the default 5 s poll and 300 s threshold.
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            session,
            poll_interval: DEFAULT_POLL_INTERVAL,
            idle_threshold: DEFAULT_IDLE_THRESHOLD,
        }
    }

    /// Override the polling interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the idle threshold.
    pub fn with_idle_threshold(mut self, threshold: Duration) -> Self {
        self.idle_threshold = threshold;
        self
    }

    /// Spawn the watchdog thread.
    pub fn start(self) -> WatchdogHandle {
        let signal = Arc::new(ShutdownSignal {
            stopped: Mutex::new(false),
            condvar: Condvar::new(),
        });
        let thread_signal = Arc::clone(&signal);

        let thread = std::thread::spawn(move || {
            tracing::info!(
                "Idle watchdog started (poll {:?}, threshold {:?})",
                self.poll_interval,
                self.idle_threshold
            );

            loop {
                {
                    let mut stopped = thread_signal.stopped.lock();
                    if !*stopped {
                        thread_signal
                            .condvar
                            .wait_for(&mut stopped, self.poll_interval);
                    }
                    if *stopped {
                        break;
                    }
                }

                self.session.expire_if_idle(self.idle_threshold);
            }

            tracing::info!("Idle watchdog stopped");
        });

        WatchdogHandle {
            signal,
            thread: Some(thread),
        }
    }
}

struct ShutdownSignal {
    stopped: Mutex<bool>,
    condvar: Condvar,
}

/// Owning handle for a running watchdog; dropping it stops the thread.
pub struct WatchdogHandle {
    signal: Arc<ShutdownSignal>,
    thread: Option<JoinHandle<()>>,
}

impl WatchdogHandle {
    /// Stop the watchdog and wait for its thread to exit.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        *self.signal.stopped.lock() = true;
        self.signal.condvar.notify_all();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for WatchdogHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::OtpChannel;
    use crate::session::RegisterRequest;
    use crate::store::CredentialStore;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::TempDir;

    struct EchoChannel;

    impl OtpChannel for EchoChannel {
        fn prompt(&self, code: &str, _digits: u32) -> Option<String> {
            Some(code.to_string())
        }
    }

    fn logged_in_session(dir: &TempDir) -> Arc<SessionManager> {
        let store = CredentialStore::new(dir.path().join("account.json"));
        let session = Arc::new(SessionManager::new(store, Box::new(EchoChannel)));
        session
            .register(RegisterRequest {
                name: "Ann".to_string(),
                dob: "1990-01-01".to_string(),
                email: "ann@x.com".to_string(),
                password: "abc123".to_string(),
                phone: "1234567890".to_string(),
            })
            .unwrap();
        session
    }

    #[test]
    fn test_watchdog_expires_idle_session_once() {
        let dir = TempDir::new().unwrap();
        let session = logged_in_session(&dir);

        let expiries = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&expiries);
        session.on_session_expired(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let handle = IdleWatchdog::new(Arc::clone(&session))
            .with_poll_interval(Duration::from_millis(10))
            .with_idle_threshold(Duration::from_millis(50))
            .start();

        // Enough time for several ticks past the threshold
        std::thread::sleep(Duration::from_millis(200));
        handle.shutdown();

        assert!(!session.is_logged_in());
        assert_eq!(expiries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_activity_prevents_expiry() {
        let dir = TempDir::new().unwrap();
        let session = logged_in_session(&dir);

        let handle = IdleWatchdog::new(Arc::clone(&session))
            .with_poll_interval(Duration::from_millis(10))
            .with_idle_threshold(Duration::from_millis(200))
            .start();

        for _ in 0..10 {
            std::thread::sleep(Duration::from_millis(20));
            session.record_activity();
        }
        assert!(session.is_logged_in());
        handle.shutdown();
    }

    #[test]
    fn test_watchdog_ignores_logged_out_session() {
        let dir = TempDir::new().unwrap();
        let session = logged_in_session(&dir);
        session.sign_out();

        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        session.on_session_expired(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let handle = IdleWatchdog::new(Arc::clone(&session))
            .with_poll_interval(Duration::from_millis(10))
            .with_idle_threshold(Duration::ZERO)
            .start();

        std::thread::sleep(Duration::from_millis(60));
        handle.shutdown();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shutdown_is_prompt() {
        let dir = TempDir::new().unwrap();
        let session = logged_in_session(&dir);

        let handle = IdleWatchdog::new(session)
            .with_poll_interval(Duration::from_secs(3600))
            .start();

        // Shutdown must interrupt the sleeping tick rather than wait it out
        let started = std::time::Instant::now();
        handle.shutdown();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
