//! Slot primitives: the (date, time) pair appointments contend for.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::{ChairbookError, Result};

/// Time-of-day label of a slot.
///
/// Input that reads as a clock time (`9:00`, `09:00`, `09:00:00`, `9h30`,
/// `14h`) is stored zero-padded as `HH:MM`, keeping seconds only when they
/// are non-zero, so equivalent spellings land on the same slot. Anything else
/// is kept verbatim (trimmed) and compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotTime(String);

impl SlotTime {
    /// Parse a user-supplied time label.
    ///
    /// # Errors
    /// Returns [`ChairbookError::Validation`] when the label is blank.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ChairbookError::validation("time is required"));
        }

        Ok(match parse_clock(trimmed) {
            Some(clock) => Self(format_clock(clock)),
            None => Self(trimmed.to_string()),
        })
    }

    /// Wrap a label read back from storage without re-validating it.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Canonical text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The clock reading, when the label is a clock time.
    pub fn clock(&self) -> Option<NaiveTime> {
        parse_clock(&self.0)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text labels sort before clock times, then by clock reading, then by
/// text.
impl Ord for SlotTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.clock().cmp(&other.clock()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for SlotTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_clock(text: &str) -> Option<NaiveTime> {
    let lowered = text.to_ascii_lowercase();
    let parts: Vec<&str> = if lowered.contains(':') {
        lowered.split(':').collect()
    } else if let Some((hour, minute)) = lowered.split_once('h') {
        vec![hour, if minute.is_empty() { "00" } else { minute }]
    } else {
        return None;
    };

    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let hour_ok = (1..=2).contains(&parts[0].len());
    let rest_ok = parts[1..].iter().all(|part| part.len() == 2);
    let digits_only = parts.iter().all(|part| part.bytes().all(|b| b.is_ascii_digit()));
    if !(hour_ok && rest_ok && digits_only) {
        return None;
    }

    let hour = parts[0].parse().ok()?;
    let minute = parts[1].parse().ok()?;
    let second = parts.get(2).map_or(Some(0), |s| s.parse().ok())?;
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn format_clock(clock: NaiveTime) -> String {
    if clock.second() == 0 {
        clock.format("%H:%M").to_string()
    } else {
        clock.format("%H:%M:%S").to_string()
    }
}

/// Unit of occupancy contention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: SlotTime,
}

impl Slot {
    pub fn new(date: NaiveDate, time: SlotTime) -> Self {
        Self { date, time }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(input: &str) -> SlotTime {
        SlotTime::parse(input).expect("valid time")
    }

    #[test]
    fn clock_spellings_collapse_to_one_label() {
        assert_eq!(time("9:00").as_str(), "09:00");
        assert_eq!(time(" 09:00 ").as_str(), "09:00");
        assert_eq!(time("09:00:00").as_str(), "09:00");
        assert_eq!(time("9h").as_str(), "09:00");
        assert_eq!(time("14h30").as_str(), "14:30");
        assert_eq!(time("14:30:15").as_str(), "14:30:15");
    }

    #[test]
    fn free_text_is_kept_verbatim() {
        assert_eq!(time("after lunch").as_str(), "after lunch");
        assert_eq!(time("25:00").as_str(), "25:00");
        assert!(time("25:00").clock().is_none());
    }

    #[test]
    fn blank_time_is_rejected() {
        assert!(matches!(SlotTime::parse("   "), Err(ChairbookError::Validation(_))));
    }

    #[test]
    fn ordering_follows_the_clock_not_the_text() {
        let mut times = vec![time("14:00"), time("9:30"), time("10:00"), time("morning")];
        times.sort();
        let labels: Vec<&str> = times.iter().map(SlotTime::as_str).collect();
        assert_eq!(labels, vec!["morning", "09:30", "10:00", "14:00"]);
    }
}
