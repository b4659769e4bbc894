//! Caller input resolution shared by the services.
//!
//! Turns the loosely formatted strings the booking surface accepts into
//! domain values, failing with `Validation` errors.

use chairbook_domain::{
    format_phone, normalize_date, AppointmentStatus, ChairbookError, Result, SlotTime,
};
use chrono::NaiveDate;

/// Resolve a date token ("hoje", "25/12/2030", "2030-12-25", ...).
pub fn resolve_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    if input.trim().is_empty() {
        return Err(ChairbookError::validation("date is required"));
    }
    normalize_date(input, today)
        .ok_or_else(|| ChairbookError::validation(format!("invalid date: '{}'", input.trim())))
}

pub fn resolve_time(input: &str) -> Result<SlotTime> {
    SlotTime::parse(input)
}

pub fn resolve_status(input: &str) -> Result<AppointmentStatus> {
    input.parse().map_err(ChairbookError::Validation)
}

pub fn resolve_client_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ChairbookError::validation("client name is required"));
    }
    Ok(name.to_string())
}

/// Format a phone number; inputs without a single digit are rejected.
pub fn resolve_phone(input: &str) -> Result<String> {
    let formatted = format_phone(input);
    if formatted.is_empty() {
        return Err(ChairbookError::validation("client phone is required"));
    }
    Ok(formatted)
}

/// Blank free text collapses to `None`.
pub fn optional_text(input: Option<&str>) -> Option<String> {
    input.map(str::trim).filter(|text| !text.is_empty()).map(str::to_string)
}
