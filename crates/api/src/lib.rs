//! # Chairbook App
//!
//! Application layer - async command facade and composition root.
//!
//! This crate contains:
//! - Commands (front end → slot engine bridge)
//! - Application context (dependency injection)
//! - Tracing setup and structured command logging
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Runs the synchronous services on the blocking thread pool

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
