//! Scheduler module
//!
//! Background tasks that run alongside the foreground session flow.
//! Currently just the idle-timeout watchdog.

mod idle_watchdog;

pub use idle_watchdog::{IdleWatchdog, WatchdogHandle};
