//! Day availability views built from the opening grid and current occupancy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::day_block::DayBlock;
use super::slot::SlotTime;

/// How a time on the grid is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Free,
    /// Held by a scheduled or finalized booking.
    Booked,
    /// Held by a slot-level block.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub time: SlotTime,
    pub state: SlotState,
}

/// Availability of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    /// False on closed weekdays, past days and blocked days.
    pub open: bool,
    pub day_block: Option<DayBlock>,
    pub slots: Vec<SlotAvailability>,
}

impl DayAvailability {
    pub fn free_times(&self) -> impl Iterator<Item = &SlotTime> + '_ {
        self.slots.iter().filter(|slot| slot.state == SlotState::Free).map(|slot| &slot.time)
    }
}
