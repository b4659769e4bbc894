//! Appointment listing

use std::sync::Arc;

use chairbook_domain::{Appointment, AppointmentFilter, AppointmentListing, Result};
use tracing::debug;

use super::ports::AppointmentStore;
use crate::clock::CalendarClock;
use crate::day_blocks::DayBlockRegistry;
use crate::input::{resolve_date, resolve_status};

/// Filtered, deterministically ordered appointment listings.
pub struct QueryEngine {
    store: Arc<dyn AppointmentStore>,
    day_blocks: Arc<DayBlockRegistry>,
    clock: Arc<dyn CalendarClock>,
}

impl QueryEngine {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        day_blocks: Arc<DayBlockRegistry>,
        clock: Arc<dyn CalendarClock>,
    ) -> Self {
        Self { store, day_blocks, clock }
    }

    /// List from raw caller input. Blank filters are ignored.
    pub fn list_input(&self, date: Option<&str>, status: Option<&str>) -> Result<AppointmentListing> {
        let date = date.filter(|value| !value.trim().is_empty());
        let status = status.filter(|value| !value.trim().is_empty());

        let filter = AppointmentFilter {
            date: date.map(|value| resolve_date(value, self.clock.today())).transpose()?,
            status: status.map(resolve_status).transpose()?,
        };
        self.list(&filter)
    }

    /// Records matching `filter`, ordered by [`sort_for_listing`]. A date
    /// filter also attaches that day's block, if any.
    pub fn list(&self, filter: &AppointmentFilter) -> Result<AppointmentListing> {
        let mut items = self.store.list(filter)?;
        sort_for_listing(&mut items);

        let day_block = match filter.date {
            Some(day) => self.day_blocks.find(day)?,
            None => None,
        };

        debug!(?filter, count = items.len(), "appointments listed");
        Ok(AppointmentListing { items, day_block })
    }
}

/// Blocked, scheduled, finalized, cancelled; then by time and id.
pub fn sort_for_listing(records: &mut [Appointment]) {
    records.sort_by(|a, b| {
        a.status
            .list_priority()
            .cmp(&b.status.list_priority())
            .then_with(|| a.time.cmp(&b.time))
            .then_with(|| a.id.cmp(&b.id))
    });
}
