//! # Chairbook Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite implementations of the appointment and day-block stores
//! - The database manager (pool + schema)
//! - Configuration loading (environment, then file)
//!
//! ## Architecture
//! - Implements traits defined in `chairbook-core`
//! - Depends on `chairbook-common` for the connection pool
//! - Contains all "impure" code (I/O)

pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::{DbManager, SqliteAppointmentStore, SqliteDayBlockRepository};
pub use errors::InfraError;
