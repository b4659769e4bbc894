//! SQLite backend implementation
//!
//! Provides an r2d2-based connection pool and write transactions for plain
//! SQLite databases.

pub mod connection;
pub mod pool;
pub mod pragmas;
pub mod transaction;

pub use connection::SqliteConnection;
pub use pool::SqlitePool;
pub use pragmas::apply_connection_pragmas;
pub use transaction::WriteTransaction;
