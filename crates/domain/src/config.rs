//! Application configuration structures
//!
//! Loading lives in `chairbook-infra`; this module only defines the shape and
//! its defaults so every crate agrees on them.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DB_PATH, DEFAULT_EXTENDED_TIMES, DEFAULT_EXTENDED_WEEKDAYS,
    DEFAULT_LOG_LEVEL, DEFAULT_OPEN_WEEKDAYS, DEFAULT_POOL_SIZE, DEFAULT_STANDARD_TIMES,
};
use crate::errors::{ChairbookError, Result};
use crate::types::SlotTime;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Reject settings the rest of the system cannot work with.
    ///
    /// # Errors
    /// Returns [`ChairbookError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(ChairbookError::Config("database.path cannot be empty".into()));
        }
        if self.database.pool_size == 0 {
            return Err(ChairbookError::Config("database.pool_size must be at least 1".into()));
        }
        if self.database.busy_timeout_ms == 0 {
            return Err(ChairbookError::Config(
                "database.busy_timeout_ms must be greater than 0".into(),
            ));
        }

        let grid = self.schedule.standard_times.iter().chain(&self.schedule.extended_times);
        for label in grid {
            let parsed = SlotTime::parse(label).map_err(|_| {
                ChairbookError::Config(format!("schedule time '{label}' is blank"))
            })?;
            if parsed.clock().is_none() {
                return Err(ChairbookError::Config(format!(
                    "schedule time '{label}' is not a clock time"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// Weekly opening grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub open_weekdays: Vec<Weekday>,
    pub standard_times: Vec<String>,
    /// Open weekdays that also offer `extended_times`.
    pub extended_weekdays: Vec<Weekday>,
    pub extended_times: Vec<String>,
}

impl ScheduleConfig {
    pub fn is_open(&self, weekday: Weekday) -> bool {
        self.open_weekdays.contains(&weekday)
    }

    pub fn offers_extended(&self, weekday: Weekday) -> bool {
        self.is_open(weekday) && self.extended_weekdays.contains(&weekday)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            open_weekdays: DEFAULT_OPEN_WEEKDAYS.to_vec(),
            standard_times: DEFAULT_STANDARD_TIMES.iter().map(ToString::to_string).collect(),
            extended_weekdays: DEFAULT_EXTENDED_WEEKDAYS.to_vec(),
            extended_times: DEFAULT_EXTENDED_TIMES.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}
