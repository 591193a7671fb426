//! Logging trait for Kimi agent client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log every HTTP exchange passing through the [`KimiClient`].
//!
//! [`KimiClient`]: crate::KimiClient

use std::time::Duration;

use crate::Error;

/// A trait for logging client operations.
///
/// Implement this trait to record each request the client issues and how it
/// ended.  Every request produces one `log_request` call, a `log_response`
/// call if a status line came back, and a `log_failure` call if the request
/// ended in an error.
///
/// # Example
///
/// ```rust,ignore
/// use kimi_client::{ClientLogger, Error};
/// use std::time::Duration;
///
/// struct StderrLogger;
///
/// impl ClientLogger for StderrLogger {
///     fn log_request(&self, method: &str, url: &str) {
///         eprintln!("-> {method} {url}");
///     }
///
///     fn log_response(&self, method: &str, url: &str, status: u16, elapsed: Duration) {
///         eprintln!("<- {method} {url} {status} in {elapsed:?}");
///     }
///
///     fn log_failure(&self, method: &str, url: &str, error: &Error) {
///         eprintln!("!! {method} {url}: {error}");
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, method: &str, url: &str);

    /// Log the status line of a response once it has been received.
    ///
    /// This is called for non-2xx statuses too; the corresponding error is
    /// then reported through `log_failure`.
    fn log_response(&self, method: &str, url: &str, status: u16, elapsed: Duration);

    /// Log a request that ended in an error.
    fn log_failure(&self, method: &str, url: &str, error: &Error);
}
