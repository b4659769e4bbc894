//! Slot-level block commands
//!
//! A blocked slot is stored as an occupying record with status `blocked`
//! and no client, so it competes for the slot exactly like a booking.

use std::sync::Arc;

use chairbook_domain::{Appointment, Result};

use crate::context::AppContext;
use crate::utils::command_helpers::run_blocking;

/// Take a single (date, time) out of circulation. Returns the blocking record.
pub async fn block_slot(ctx: &AppContext, date: String, time: String) -> Result<Appointment> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("slots::block_slot", move || lifecycle.block_slot(&date, &time)).await
}

/// Remove the slot block at (date, time).
pub async fn unblock_slot(ctx: &AppContext, date: String, time: String) -> Result<()> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("slots::unblock_slot", move || lifecycle.unblock_slot(&date, &time)).await
}
