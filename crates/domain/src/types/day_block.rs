//! Whole-day blocks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar day closed to new or moved appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBlock {
    pub day: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Answer to "is this day blocked, and why".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBlockStatus {
    pub blocked: bool,
    pub reason: Option<String>,
}

impl From<Option<&DayBlock>> for DayBlockStatus {
    fn from(block: Option<&DayBlock>) -> Self {
        match block {
            Some(block) => Self { blocked: true, reason: block.reason.clone() },
            None => Self::default(),
        }
    }
}
