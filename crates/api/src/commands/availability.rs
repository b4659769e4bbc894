use std::sync::Arc;

use chairbook_domain::{DayAvailability, Result};

use crate::context::AppContext;
use crate::utils::command_helpers::run_blocking;

/// The opening grid for `date` with each time marked free, booked or blocked.
pub async fn available_slots(ctx: &AppContext, date: String) -> Result<DayAvailability> {
    let availability = Arc::clone(&ctx.availability);
    run_blocking("availability::available_slots", move || availability.for_input(&date)).await
}
