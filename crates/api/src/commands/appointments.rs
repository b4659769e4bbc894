//! Appointment commands
//!
//! # Commands
//!
//! - `create_appointment` - Book a slot in `scheduled` status
//! - `get_appointment` - Fetch one record
//! - `list_appointments` - Filtered, ordered listing with day-block annotation
//! - `update_appointment` - Partial edit, re-checked against every booking rule
//! - `finalize_appointment` / `cancel_appointment` - Close a scheduled record
//! - `delete_appointment` - Hard delete of a finalized or cancelled record
//! - `bulk_delete_cancelled` - Purge every cancelled record

use std::sync::Arc;

use chairbook_domain::{
    Appointment, AppointmentId, AppointmentListing, AppointmentPatch, BookingRequest, Result,
};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::utils::command_helpers::run_blocking;

/// Result of [`bulk_delete_cancelled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteOutcome {
    pub removed_count: usize,
}

pub async fn create_appointment(ctx: &AppContext, request: BookingRequest) -> Result<Appointment> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("appointments::create_appointment", move || lifecycle.create(&request)).await
}

pub async fn get_appointment(ctx: &AppContext, id: AppointmentId) -> Result<Appointment> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("appointments::get_appointment", move || lifecycle.get(id)).await
}

/// List appointments, optionally filtered by a date (any accepted input
/// form) and a status. Blank filters are ignored.
pub async fn list_appointments(
    ctx: &AppContext,
    date: Option<String>,
    status: Option<String>,
) -> Result<AppointmentListing> {
    let queries = Arc::clone(&ctx.queries);
    run_blocking("appointments::list_appointments", move || {
        queries.list_input(date.as_deref(), status.as_deref())
    })
    .await
}

pub async fn update_appointment(
    ctx: &AppContext,
    id: AppointmentId,
    patch: AppointmentPatch,
) -> Result<Appointment> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("appointments::update_appointment", move || lifecycle.update(id, &patch)).await
}

pub async fn finalize_appointment(ctx: &AppContext, id: AppointmentId) -> Result<Appointment> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("appointments::finalize_appointment", move || lifecycle.finalize(id)).await
}

pub async fn cancel_appointment(ctx: &AppContext, id: AppointmentId) -> Result<Appointment> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("appointments::cancel_appointment", move || lifecycle.cancel(id)).await
}

pub async fn delete_appointment(ctx: &AppContext, id: AppointmentId) -> Result<()> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("appointments::delete_appointment", move || lifecycle.delete(id)).await
}

pub async fn bulk_delete_cancelled(ctx: &AppContext) -> Result<BulkDeleteOutcome> {
    let lifecycle = Arc::clone(&ctx.lifecycle);
    run_blocking("appointments::bulk_delete_cancelled", move || {
        lifecycle.bulk_delete_cancelled().map(|removed_count| BulkDeleteOutcome { removed_count })
    })
    .await
}
