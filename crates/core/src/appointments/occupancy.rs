//! Slot occupancy rule
//!
//! At most one scheduled, finalized or blocked record may exist per
//! (date, time). Cancelled records never occupy anything.

use chairbook_domain::{
    Appointment, AppointmentId, AppointmentStatus, ChairbookError, Occupant, Result, Slot,
};
use tracing::debug;

use super::ports::AppointmentUnitOfWork;

/// A record about to land on a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotClaim {
    pub slot: Slot,
    /// Status the record will have once written.
    pub status: AppointmentStatus,
    /// The record being edited, which never conflicts with itself.
    pub exclude: Option<AppointmentId>,
}

impl SlotClaim {
    pub fn new(slot: Slot, status: AppointmentStatus) -> Self {
        Self { slot, status, exclude: None }
    }

    pub fn excluding(mut self, id: AppointmentId) -> Self {
        self.exclude = Some(id);
        self
    }
}

/// Decides whether a slot can take a claim.
pub struct SlotOccupancyGuard;

impl SlotOccupancyGuard {
    /// The record currently holding the claimed slot, if any.
    pub fn occupant<'a, I>(claim: &SlotClaim, existing: I) -> Option<Occupant>
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        existing
            .into_iter()
            .filter(|record| record.date == claim.slot.date && record.time == claim.slot.time)
            .filter(|record| Some(record.id) != claim.exclude)
            .find_map(Appointment::occupant)
    }

    /// Pure form of the rule over an already-loaded record set.
    pub fn check<'a, I>(claim: &SlotClaim, existing: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        if !claim.status.is_occupying() {
            return Ok(());
        }

        match Self::occupant(claim, existing) {
            Some(occupant) => {
                debug!(slot = %claim.slot, occupant = %occupant.id(), "slot already occupied");
                Err(ChairbookError::SlotConflict {
                    date: claim.slot.date,
                    time: claim.slot.time.to_string(),
                })
            }
            None => Ok(()),
        }
    }

    /// Check the claim against what the unit of work currently sees.
    pub fn ensure_available(uow: &mut dyn AppointmentUnitOfWork, claim: &SlotClaim) -> Result<()> {
        if !claim.status.is_occupying() {
            return Ok(());
        }
        let records = uow.records_at(&claim.slot)?;
        Self::check(claim, &records)
    }
}
