//! Database implementations

pub mod appointment_store;
pub mod day_block_repository;
pub mod manager;

pub use appointment_store::SqliteAppointmentStore;
pub use day_block_repository::SqliteDayBlockRepository;
pub use manager::DbManager;
