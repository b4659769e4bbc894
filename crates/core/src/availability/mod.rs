//! Day availability views for booking front ends

pub mod planner;

pub use planner::AvailabilityPlanner;
