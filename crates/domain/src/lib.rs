//! # Chairbook Domain
//!
//! Business domain types for the Chairbook slot engine.
//!
//! This crate contains:
//! - Appointment, day-block, slot and availability types
//! - The `ChairbookError` taxonomy and `Result` alias
//! - Configuration structures and their defaults
//! - Pure helpers: date normalization and phone formatting
//!
//! ## Architecture
//! - Depends only on `chairbook-common` (error classification)
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::{format_phone, is_past, normalize_date};
