//! Commands - front end to slot engine bridge

mod appointments;
mod availability;
mod day_blocks;
mod health;
mod slots;

pub use appointments::*;
pub use availability::*;
pub use day_blocks::*;
pub use health::*;
pub use slots::*;
