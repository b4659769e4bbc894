//! Availability planner
//!
//! Lays the shop's opening grid over the day's occupying records. The grid
//! comes from [`ScheduleConfig`]; occupancy comes from the appointment store
//! through the same rule the lifecycle enforces.

use std::collections::BTreeMap;
use std::sync::Arc;

use chairbook_domain::{
    is_past, AppointmentFilter, AppointmentStatus, DayAvailability, Result, ScheduleConfig,
    SlotAvailability, SlotState, SlotTime,
};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::appointments::ports::AppointmentStore;
use crate::clock::CalendarClock;
use crate::day_blocks::DayBlockRegistry;
use crate::input::resolve_date;

pub struct AvailabilityPlanner {
    store: Arc<dyn AppointmentStore>,
    day_blocks: Arc<DayBlockRegistry>,
    clock: Arc<dyn CalendarClock>,
    schedule: ScheduleConfig,
}

impl AvailabilityPlanner {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        day_blocks: Arc<DayBlockRegistry>,
        clock: Arc<dyn CalendarClock>,
        schedule: ScheduleConfig,
    ) -> Self {
        Self { store, day_blocks, clock, schedule }
    }

    pub fn for_input(&self, date: &str) -> Result<DayAvailability> {
        self.for_date(resolve_date(date, self.clock.today())?)
    }

    /// Slot states for `date`.
    ///
    /// Past days, closed weekdays and blocked days are reported closed and
    /// list no free slots. Occupied times are always listed, on or off the
    /// grid.
    pub fn for_date(&self, date: NaiveDate) -> Result<DayAvailability> {
        let day_block = self.day_blocks.find(date)?;
        let weekday = date.weekday();
        let open = self.schedule.is_open(weekday)
            && day_block.is_none()
            && !is_past(date, self.clock.today());

        let mut states: BTreeMap<SlotTime, SlotState> = BTreeMap::new();
        if open {
            for time in self.grid(date) {
                states.insert(time, SlotState::Free);
            }
        }

        let filter = AppointmentFilter { date: Some(date), status: None };
        for record in self.store.list(&filter)? {
            let state = match record.status {
                AppointmentStatus::Cancelled => continue,
                AppointmentStatus::Blocked => SlotState::Blocked,
                AppointmentStatus::Scheduled | AppointmentStatus::Finalized => SlotState::Booked,
            };
            states.insert(record.time, state);
        }

        let slots: Vec<SlotAvailability> =
            states.into_iter().map(|(time, state)| SlotAvailability { time, state }).collect();

        debug!(%date, open, slots = slots.len(), "availability computed");
        Ok(DayAvailability { date, open, day_block, slots })
    }

    /// The opening grid for `date`'s weekday, ignoring occupancy.
    pub fn grid(&self, date: NaiveDate) -> Vec<SlotTime> {
        let weekday = date.weekday();
        if !self.schedule.is_open(weekday) {
            return Vec::new();
        }

        let extended = self
            .schedule
            .offers_extended(weekday)
            .then_some(self.schedule.extended_times.iter())
            .into_iter()
            .flatten();

        self.schedule
            .standard_times
            .iter()
            .chain(extended)
            .filter_map(|time| SlotTime::parse(time).ok())
            .collect()
    }
}
