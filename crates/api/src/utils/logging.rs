use std::time::Duration;

use chairbook_common::{ErrorClassification, ErrorSeverity};
use chairbook_domain::constants::DEFAULT_LOG_LEVEL;
use chairbook_domain::{ChairbookError, LoggingConfig};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.level`; an unparseable level falls back to
/// `info`. Returns `false` when a subscriber was already installed, so
/// calling this more than once is harmless.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed =
        if config.json { builder.json().try_init() } else { builder.try_init() };

    installed.is_ok()
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"appointments::create_appointment"`).
/// * `elapsed` - Duration the command execution took.
/// * `failure` - The error the command returned, if any.
///
/// Failures carry `error_type` (the error's stable label) and are logged at
/// `error` level only when the failure points at the system rather than at
/// the request.
pub fn log_command_execution(command: &str, elapsed: Duration, failure: Option<&ChairbookError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    let Some(err) = failure else {
        info!(command, duration_ms, "command_execution_success");
        return;
    };

    let error_type = err.label();
    let recoverable = err.is_recoverable();
    if err.severity() >= ErrorSeverity::Error {
        error!(command, duration_ms, error_type, recoverable, error = %err, "command_execution_failure");
    } else {
        warn!(command, duration_ms, error_type, recoverable, error = %err, "command_execution_failure");
    }
}
