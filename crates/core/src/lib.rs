//! # Chairbook Core
//!
//! Slot engine business logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for appointment and day-block storage
//! - The slot occupancy rule
//! - Services: appointment lifecycle, listing, day blocks, availability
//!
//! ## Architecture Principles
//! - Only depends on `chairbook-domain`
//! - No database or platform code
//! - All external dependencies via traits
//! - Synchronous: callers decide which thread the work runs on

pub mod appointments;
pub mod availability;
pub mod clock;
pub mod day_blocks;
pub mod input;

pub use appointments::ports::{AppointmentStore, AppointmentUnitOfWork};
pub use appointments::{AppointmentLifecycle, QueryEngine, SlotClaim, SlotOccupancyGuard};
pub use availability::AvailabilityPlanner;
pub use clock::{CalendarClock, FixedCalendarClock, SystemCalendarClock};
pub use day_blocks::ports::DayBlockRepository;
pub use day_blocks::DayBlockRegistry;
