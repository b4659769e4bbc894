//! Error classification shared across Chairbook crates
//!
//! Module-specific errors stay in their own crates; this module only gives
//! them a common vocabulary for deciding whether a failure is transient and
//! how loudly it should be reported.

use std::fmt;
use std::time::Duration;

/// Standard interface for classifying errors by their characteristics.
pub trait ErrorClassification {
    /// Transient failures (lock contention, pool timeouts) that may succeed
    /// on a later attempt.
    fn is_retryable(&self) -> bool;

    /// Severity used for logging and alerting decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Errors that indicate corrupted state or a broken deployment.
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Suggested delay before retrying, when one is known.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
