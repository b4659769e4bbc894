//! Infrastructure error mapping

mod conversions;

pub use conversions::{is_constraint_violation, is_unique_violation, InfraError};
