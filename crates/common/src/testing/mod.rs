//! Testing utilities and helpers
//!
//! - **[`temp`]**: throwaway database locations that clean up after
//!   themselves

pub mod temp;

pub use temp::TempDatabase;
