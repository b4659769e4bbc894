//! Whole-day blocks

pub mod ports;
pub mod registry;

pub use registry::DayBlockRegistry;
