//! Domain types

pub mod appointment;
pub mod availability;
pub mod day_block;
pub mod slot;

pub use appointment::{
    Appointment, AppointmentChanges, AppointmentFilter, AppointmentId, AppointmentListing,
    AppointmentPatch, AppointmentStatus, BookingRequest, NewAppointment, Occupant,
};
pub use availability::{DayAvailability, SlotAvailability, SlotState};
pub use day_block::{DayBlock, DayBlockStatus};
pub use slot::{Slot, SlotTime};
