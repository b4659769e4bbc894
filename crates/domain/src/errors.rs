//! Error types used throughout the application

use chairbook_common::{ErrorClassification, ErrorSeverity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AppointmentId, AppointmentStatus};

/// Main error type for Chairbook
///
/// The first group of variants is the scheduling taxonomy every front end
/// must be able to tell apart; the last three are ambient failures of the
/// surrounding infrastructure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ChairbookError {
    /// Missing or malformed required field, unparseable date, unknown status.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Date {date} is in the past")]
    PastDate { date: NaiveDate },

    #[error("Day {day} is blocked{}", reason_suffix(.reason))]
    DayBlocked { day: NaiveDate, reason: Option<String> },

    #[error("Slot {date} {time} is already taken")]
    SlotConflict { date: NaiveDate, time: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not allowed from the record's current status.
    #[error("Appointment {id} cannot leave status '{status}' this way")]
    InvalidTransition { id: AppointmentId, status: AppointmentStatus },

    #[error("Nothing to update")]
    NothingToUpdate,

    /// Uniqueness violation outside the slot space (day already blocked).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {reason}"),
        None => String::new(),
    }
}

impl ChairbookError {
    /// Shorthand for [`ChairbookError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for [`ChairbookError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Stable snake_case label suitable for logs and metrics.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::PastDate { .. } => "past_date",
            Self::DayBlocked { .. } => "day_blocked",
            Self::SlotConflict { .. } => "slot_conflict",
            Self::NotFound(_) => "not_found",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::NothingToUpdate => "nothing_to_update",
            Self::Conflict(_) => "conflict",
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the caller can reasonably recover by choosing another slot.
    ///
    /// Only a lost race for a slot qualifies; every other error is terminal
    /// for the request that produced it.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::SlotConflict { .. })
    }
}

/// Result type alias for Chairbook operations
pub type Result<T> = std::result::Result<T, ChairbookError>;

impl ErrorClassification for ChairbookError {
    /// Storage failures here are almost always lock contention.
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(_)
            | Self::PastDate { .. }
            | Self::DayBlocked { .. }
            | Self::SlotConflict { .. }
            | Self::NotFound(_)
            | Self::InvalidTransition { .. }
            | Self::NothingToUpdate
            | Self::Conflict(_) => ErrorSeverity::Info,
            Self::Database(_) => ErrorSeverity::Error,
            Self::Config(_) | Self::Internal(_) => ErrorSeverity::Critical,
        }
    }
}
