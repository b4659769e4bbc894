//! Appointment lifecycle service
//!
//! Every mutation runs inside one unit of work: the record lookups, the
//! occupancy check and the write all happen while the store's write lock is
//! held, so two concurrent requests can never both pass the check for the
//! same slot. Day-block lookups happen before the lock is taken.

use std::sync::Arc;

use chairbook_domain::{
    is_past, Appointment, AppointmentChanges, AppointmentId, AppointmentPatch, AppointmentStatus,
    BookingRequest, ChairbookError, NewAppointment, Result, Slot,
};
use chrono::NaiveDate;
use tracing::{info, warn};

use super::occupancy::{SlotClaim, SlotOccupancyGuard};
use super::ports::{AppointmentStore, AppointmentUnitOfWork};
use crate::clock::CalendarClock;
use crate::day_blocks::DayBlockRegistry;
use crate::input::{
    optional_text, resolve_client_name, resolve_date, resolve_phone, resolve_status, resolve_time,
};

/// Creates, edits, transitions and removes appointment records.
pub struct AppointmentLifecycle {
    store: Arc<dyn AppointmentStore>,
    day_blocks: Arc<DayBlockRegistry>,
    clock: Arc<dyn CalendarClock>,
}

impl AppointmentLifecycle {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        day_blocks: Arc<DayBlockRegistry>,
        clock: Arc<dyn CalendarClock>,
    ) -> Self {
        Self { store, day_blocks, clock }
    }

    /// Book a new appointment in `Scheduled` status.
    ///
    /// # Errors
    /// `Validation` for a blank name, a phone without digits, a missing or
    /// unreadable date or a blank time; then `PastDate`, `DayBlocked` and
    /// `SlotConflict`, in that order.
    pub fn create(&self, request: &BookingRequest) -> Result<Appointment> {
        let client_name = resolve_client_name(&request.client_name)?;
        let client_phone = resolve_phone(&request.client_phone)?;
        let date = resolve_date(&request.date, self.clock.today())?;
        let time = resolve_time(&request.time)?;

        self.ensure_bookable_day(date)?;

        let record = NewAppointment {
            client_name,
            client_phone,
            date,
            time,
            service: optional_text(request.service.as_deref()),
            status: AppointmentStatus::Scheduled,
        };

        let mut uow = self.store.begin()?;
        let claim = SlotClaim::new(record.slot(), record.status);
        SlotOccupancyGuard::ensure_available(uow.as_mut(), &claim)
            .inspect_err(|err| warn!(slot = %claim.slot, error = %err, "booking rejected"))?;
        let created = uow.insert(&record)?;
        uow.commit()?;

        info!(id = %created.id, slot = %created.slot(), "appointment created");
        Ok(created)
    }

    pub fn get(&self, id: AppointmentId) -> Result<Appointment> {
        self.store.find_by_id(id)?.ok_or_else(|| missing(id))
    }

    /// Apply a partial edit.
    ///
    /// The date, time and status the record will have after the edit are
    /// what the past-date, day-block and occupancy rules are checked against.
    /// If a concurrent edit moved the record to another day before the lock
    /// was taken, the day rules are checked again for that day.
    /// Only the fields present in `patch` are written.
    pub fn update(&self, id: AppointmentId, patch: &AppointmentPatch) -> Result<Appointment> {
        let current = self.get(id)?;
        if patch.is_empty() {
            return Err(ChairbookError::NothingToUpdate);
        }

        let changes = self.resolve_patch(patch)?;
        let checked_date = changes.merged_over(&current).date;
        self.ensure_bookable_day(checked_date)?;

        let mut uow = self.store.begin()?;
        // Re-read under the write lock; the record may have moved or gone.
        let current = uow.find_by_id(id)?.ok_or_else(|| missing(id))?;
        let effective = changes.merged_over(&current);
        if effective.date != checked_date {
            self.ensure_bookable_day(effective.date)?;
        }

        let claim = SlotClaim::new(effective.slot(), effective.status).excluding(id);
        SlotOccupancyGuard::ensure_available(uow.as_mut(), &claim)
            .inspect_err(|err| warn!(%id, slot = %claim.slot, error = %err, "edit rejected"))?;

        let updated = uow.update(id, &changes)?;
        uow.commit()?;

        info!(%id, slot = %updated.slot(), status = %updated.status, "appointment updated");
        Ok(updated)
    }

    /// `Scheduled` → `Finalized`.
    pub fn finalize(&self, id: AppointmentId) -> Result<Appointment> {
        self.transition(id, AppointmentStatus::Finalized)
    }

    /// `Scheduled` → `Cancelled`. The slot becomes free immediately.
    pub fn cancel(&self, id: AppointmentId) -> Result<Appointment> {
        self.transition(id, AppointmentStatus::Cancelled)
    }

    /// Remove a finalized or cancelled record.
    pub fn delete(&self, id: AppointmentId) -> Result<()> {
        let mut uow = self.store.begin()?;
        let current = uow.find_by_id(id)?.ok_or_else(|| missing(id))?;
        if !current.status.is_terminal() {
            warn!(%id, status = %current.status, "delete rejected");
            return Err(ChairbookError::InvalidTransition { id, status: current.status });
        }

        uow.delete(id)?;
        uow.commit()?;
        info!(%id, "appointment deleted");
        Ok(())
    }

    /// Remove every cancelled record. Running it again removes nothing.
    pub fn bulk_delete_cancelled(&self) -> Result<usize> {
        let mut uow = self.store.begin()?;
        let removed = uow.delete_by_status(AppointmentStatus::Cancelled)?;
        uow.commit()?;
        info!(removed, "cancelled appointments purged");
        Ok(removed)
    }

    /// Close a single slot with a synthetic `Blocked` record.
    ///
    /// Goes through the past-date and occupancy checks but not through
    /// client validation or the day-block check.
    pub fn block_slot(&self, date: &str, time: &str) -> Result<Appointment> {
        let slot = self.resolve_slot(date, time)?;
        if is_past(slot.date, self.clock.today()) {
            return Err(ChairbookError::PastDate { date: slot.date });
        }

        let record = NewAppointment::slot_block(slot);
        let mut uow = self.store.begin()?;
        SlotOccupancyGuard::ensure_available(
            uow.as_mut(),
            &SlotClaim::new(record.slot(), AppointmentStatus::Blocked),
        )?;
        let created = uow.insert(&record)?;
        uow.commit()?;

        info!(id = %created.id, slot = %created.slot(), "slot blocked");
        Ok(created)
    }

    /// Remove the `Blocked` record at the slot.
    pub fn unblock_slot(&self, date: &str, time: &str) -> Result<()> {
        let slot = self.resolve_slot(date, time)?;

        let mut uow = self.store.begin()?;
        let block = uow
            .records_at(&slot)?
            .into_iter()
            .find(|record| record.status == AppointmentStatus::Blocked)
            .ok_or_else(|| ChairbookError::not_found(format!("no slot block at {slot}")))?;
        uow.delete(block.id)?;
        uow.commit()?;

        info!(id = %block.id, %slot, "slot unblocked");
        Ok(())
    }

    fn transition(&self, id: AppointmentId, to: AppointmentStatus) -> Result<Appointment> {
        let mut uow = self.store.begin()?;
        let current = uow.find_by_id(id)?.ok_or_else(|| missing(id))?;
        if current.status != AppointmentStatus::Scheduled {
            warn!(%id, from = %current.status, %to, "transition rejected");
            return Err(ChairbookError::InvalidTransition { id, status: current.status });
        }

        let changes = AppointmentChanges { status: Some(to), ..AppointmentChanges::default() };
        let updated = uow.update(id, &changes)?;
        uow.commit()?;

        info!(%id, status = %to, "appointment transitioned");
        Ok(updated)
    }

    fn resolve_patch(&self, patch: &AppointmentPatch) -> Result<AppointmentChanges> {
        Ok(AppointmentChanges {
            client_name: patch.client_name.as_deref().map(resolve_client_name).transpose()?,
            client_phone: patch.client_phone.as_deref().map(resolve_phone).transpose()?,
            service: patch.service.as_ref().map(|service| optional_text(service.as_deref())),
            date: patch
                .date
                .as_deref()
                .map(|date| resolve_date(date, self.clock.today()))
                .transpose()?,
            time: patch.time.as_deref().map(resolve_time).transpose()?,
            status: patch.status.as_deref().map(resolve_status).transpose()?,
        })
    }

    fn resolve_slot(&self, date: &str, time: &str) -> Result<Slot> {
        Ok(Slot::new(resolve_date(date, self.clock.today())?, resolve_time(time)?))
    }

    fn ensure_bookable_day(&self, date: NaiveDate) -> Result<()> {
        if is_past(date, self.clock.today()) {
            warn!(%date, "date is in the past");
            return Err(ChairbookError::PastDate { date });
        }
        self.day_blocks.ensure_open(date).inspect_err(|_| warn!(%date, "day is blocked"))
    }
}

fn missing(id: AppointmentId) -> ChairbookError {
    ChairbookError::not_found(format!("appointment {id}"))
}
