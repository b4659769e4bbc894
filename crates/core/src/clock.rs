//! Calendar clock port
//!
//! Date normalization and the past-date rule both need "today". Services
//! read it through this trait so tests can pin the calendar.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current calendar date and creation timestamps.
pub trait CalendarClock: Send + Sync {
    /// Today's date in the server's local calendar.
    fn today(&self) -> NaiveDate;

    /// Timestamp recorded on newly created rows.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendarClock;

impl CalendarClock for SystemCalendarClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given date, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendarClock {
    today: NaiveDate,
    now: DateTime<Utc>,
}

impl FixedCalendarClock {
    pub fn new(today: NaiveDate) -> Self {
        let now = today.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self { today, now }
    }
}

impl CalendarClock for FixedCalendarClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
