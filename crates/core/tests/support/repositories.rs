//! In-memory implementations of the core storage ports.
//!
//! The appointment store serializes units of work on one mutex, mirroring the
//! single-writer lock the SQLite store takes with `BEGIN IMMEDIATE`. Changes
//! are staged on a copy and only written back on commit.

use std::collections::BTreeMap;

use chairbook_core::{AppointmentStore, AppointmentUnitOfWork, DayBlockRepository};
use chairbook_domain::{
    Appointment, AppointmentChanges, AppointmentFilter, AppointmentId, AppointmentStatus,
    ChairbookError, DayBlock, NewAppointment, Result, Slot,
};
use chrono::{NaiveDate, Utc};
use parking_lot::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
struct Table {
    rows: BTreeMap<AppointmentId, Appointment>,
    next_id: i64,
}

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    table: Mutex<Table>,
}

impl InMemoryAppointmentStore {
    pub fn all(&self) -> Vec<Appointment> {
        self.table.lock().rows.values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.table.lock().rows.len()
    }
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn begin(&self) -> Result<Box<dyn AppointmentUnitOfWork + '_>> {
        let guard = self.table.lock();
        let staged = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork { guard, staged }))
    }

    fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        Ok(self.table.lock().rows.get(&id).cloned())
    }

    fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        Ok(self.table.lock().rows.values().filter(|row| filter.matches(row)).cloned().collect())
    }
}

struct InMemoryUnitOfWork<'a> {
    guard: MutexGuard<'a, Table>,
    staged: Table,
}

impl AppointmentUnitOfWork for InMemoryUnitOfWork<'_> {
    fn find_by_id(&mut self, id: AppointmentId) -> Result<Option<Appointment>> {
        Ok(self.staged.rows.get(&id).cloned())
    }

    fn records_at(&mut self, slot: &Slot) -> Result<Vec<Appointment>> {
        Ok(self
            .staged
            .rows
            .values()
            .filter(|row| row.date == slot.date && row.time == slot.time)
            .cloned()
            .collect())
    }

    fn insert(&mut self, record: &NewAppointment) -> Result<Appointment> {
        self.staged.next_id += 1;
        let row = Appointment {
            id: AppointmentId::new(self.staged.next_id),
            client_name: record.client_name.clone(),
            client_phone: record.client_phone.clone(),
            date: record.date,
            time: record.time.clone(),
            service: record.service.clone(),
            status: record.status,
            created_at: Utc::now(),
        };
        self.staged.rows.insert(row.id, row.clone());
        Ok(row)
    }

    fn update(&mut self, id: AppointmentId, changes: &AppointmentChanges) -> Result<Appointment> {
        let current = self
            .staged
            .rows
            .get(&id)
            .ok_or_else(|| ChairbookError::not_found(format!("appointment {id}")))?;
        let updated = changes.merged_over(current);
        self.staged.rows.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete(&mut self, id: AppointmentId) -> Result<bool> {
        Ok(self.staged.rows.remove(&id).is_some())
    }

    fn delete_by_status(&mut self, status: AppointmentStatus) -> Result<usize> {
        let before = self.staged.rows.len();
        self.staged.rows.retain(|_, row| row.status != status);
        Ok(before - self.staged.rows.len())
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let Self { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDayBlockRepository {
    blocks: Mutex<BTreeMap<NaiveDate, DayBlock>>,
}

impl DayBlockRepository for InMemoryDayBlockRepository {
    fn insert(&self, block: &DayBlock) -> Result<()> {
        let mut blocks = self.blocks.lock();
        if blocks.contains_key(&block.day) {
            return Err(ChairbookError::Conflict(format!("day {} is already blocked", block.day)));
        }
        blocks.insert(block.day, block.clone());
        Ok(())
    }

    fn delete(&self, day: NaiveDate) -> Result<bool> {
        Ok(self.blocks.lock().remove(&day).is_some())
    }

    fn find(&self, day: NaiveDate) -> Result<Option<DayBlock>> {
        Ok(self.blocks.lock().get(&day).cloned())
    }

    fn list(&self) -> Result<Vec<DayBlock>> {
        Ok(self.blocks.lock().values().cloned().collect())
    }
}

/// Appointment store that applies one staged edit just before the next unit
/// of work opens, standing in for a request that won the lock first.
#[derive(Default)]
pub struct ConcurrentlyMovedStore {
    inner: InMemoryAppointmentStore,
    pending: Mutex<Option<(AppointmentId, AppointmentChanges)>>,
}

impl ConcurrentlyMovedStore {
    pub fn move_before_next_lock(&self, id: AppointmentId, changes: AppointmentChanges) {
        *self.pending.lock() = Some((id, changes));
    }
}

impl AppointmentStore for ConcurrentlyMovedStore {
    fn begin(&self) -> Result<Box<dyn AppointmentUnitOfWork + '_>> {
        let pending = self.pending.lock().take();
        if let Some((id, changes)) = pending {
            let mut uow = self.inner.begin()?;
            uow.update(id, &changes)?;
            uow.commit()?;
        }
        self.inner.begin()
    }

    fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        self.inner.find_by_id(id)
    }

    fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        self.inner.list(filter)
    }
}
