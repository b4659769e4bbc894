//! Command execution helpers
//!
//! The core services are synchronous and talk to SQLite through a pool, so
//! commands run them on tokio's blocking thread pool rather than on the
//! async workers.

use std::time::Instant;

use chairbook_domain::{ChairbookError, Result};

use crate::utils::logging::log_command_execution;

/// Run `work` on the blocking pool, timing and logging the outcome.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn get_appointment(ctx: &AppContext, id: AppointmentId) -> Result<Appointment> {
///     let lifecycle = Arc::clone(&ctx.lifecycle);
///     run_blocking("appointments::get_appointment", move || lifecycle.get(id)).await
/// }
/// ```
///
/// # Errors
/// Whatever `work` returns; a panic inside `work` surfaces as
/// [`ChairbookError::Internal`].
pub async fn run_blocking<T, F>(command: &'static str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let start = Instant::now();

    let result = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ChairbookError::Internal(format!("{command}: task join error: {e}")))
        .and_then(|outcome| outcome);

    log_command_execution(command, start.elapsed(), result.as_ref().err());
    result
}
