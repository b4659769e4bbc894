//! Port interfaces for appointment storage

use chairbook_domain::{
    Appointment, AppointmentChanges, AppointmentFilter, AppointmentId, AppointmentStatus,
    NewAppointment, Result, Slot,
};

/// Appointment persistence.
///
/// Reads go straight to the store. Every write goes through a unit of work
/// opened with [`AppointmentStore::begin`], which holds the store's write
/// lock until it is committed or dropped. A conflict check performed inside
/// the unit of work therefore stays true until its commit.
pub trait AppointmentStore: Send + Sync {
    /// Open a unit of work holding the write lock.
    fn begin(&self) -> Result<Box<dyn AppointmentUnitOfWork + '_>>;

    fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>>;

    /// Records matching `filter`, in no particular order.
    fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>>;
}

/// A serialized write session. Dropping it without [`commit`] discards every
/// staged change.
///
/// [`commit`]: AppointmentUnitOfWork::commit
pub trait AppointmentUnitOfWork {
    fn find_by_id(&mut self, id: AppointmentId) -> Result<Option<Appointment>>;

    /// Every record stored at `slot`, cancelled ones included.
    fn records_at(&mut self, slot: &Slot) -> Result<Vec<Appointment>>;

    fn insert(&mut self, record: &NewAppointment) -> Result<Appointment>;

    /// Apply `changes` to an existing record and return the stored result.
    fn update(&mut self, id: AppointmentId, changes: &AppointmentChanges) -> Result<Appointment>;

    /// Returns `false` when no row had that id.
    fn delete(&mut self, id: AppointmentId) -> Result<bool>;

    /// Delete every record with `status`, returning how many went.
    fn delete_by_status(&mut self, status: AppointmentStatus) -> Result<usize>;

    fn commit(self: Box<Self>) -> Result<()>;
}
