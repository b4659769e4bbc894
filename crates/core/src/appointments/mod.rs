//! Appointment booking, editing and listing

pub mod lifecycle;
pub mod occupancy;
pub mod ports;
pub mod query;

pub use lifecycle::AppointmentLifecycle;
pub use occupancy::{SlotClaim, SlotOccupancyGuard};
pub use query::{sort_for_listing, QueryEngine};
