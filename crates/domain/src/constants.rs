//! Application constants
//!
//! Centralized location for domain-level defaults.

use chrono::Weekday;

// Storage defaults
pub const DEFAULT_DB_PATH: &str = "data/chairbook.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Opening grid
pub const DEFAULT_OPEN_WEEKDAYS: [Weekday; 5] =
    [Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat];

pub const DEFAULT_STANDARD_TIMES: [&str; 14] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "13:30", "14:00", "14:30", "15:00", "15:30",
    "16:00", "16:30", "17:00", "17:30",
];

/// Late evening slots offered only on the busiest days.
pub const DEFAULT_EXTENDED_WEEKDAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];

pub const DEFAULT_EXTENDED_TIMES: [&str; 5] = ["18:00", "18:30", "19:00", "19:30", "20:00"];
