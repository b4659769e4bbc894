//! Shared test helpers for `chairbook-core` integration tests.
//!
//! In-memory port implementations plus a fixture that wires every service
//! over them with a pinned calendar.

#![allow(dead_code)]

pub mod repositories;

use std::sync::Arc;

use chairbook_core::{
    AppointmentLifecycle, AvailabilityPlanner, DayBlockRegistry, FixedCalendarClock, QueryEngine,
};
use chairbook_domain::{BookingRequest, ScheduleConfig};
use chrono::NaiveDate;

pub use repositories::{
    ConcurrentlyMovedStore, InMemoryAppointmentStore, InMemoryDayBlockRepository,
};

/// Tuesday, an open day in the default grid.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).expect("valid date")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn booking(name: &str, date: &str, time: &str) -> BookingRequest {
    BookingRequest {
        client_name: name.to_string(),
        client_phone: "11999998888".to_string(),
        date: date.to_string(),
        time: time.to_string(),
        service: Some("Corte".to_string()),
    }
}

/// Send service logs to the test harness's captured output.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Every service wired over the same in-memory stores.
pub struct Harness {
    pub store: Arc<InMemoryAppointmentStore>,
    pub day_block_repo: Arc<InMemoryDayBlockRepository>,
    pub day_blocks: Arc<DayBlockRegistry>,
    pub lifecycle: AppointmentLifecycle,
    pub queries: QueryEngine,
    pub availability: AvailabilityPlanner,
}

impl Harness {
    pub fn new() -> Self {
        Self::at(today())
    }

    pub fn at(today: NaiveDate) -> Self {
        init_test_tracing();
        let clock = Arc::new(FixedCalendarClock::new(today));
        let store = Arc::new(InMemoryAppointmentStore::default());
        let day_block_repo = Arc::new(InMemoryDayBlockRepository::default());
        let day_blocks = Arc::new(DayBlockRegistry::new(day_block_repo.clone(), clock.clone()));

        Self {
            lifecycle: AppointmentLifecycle::new(
                store.clone(),
                day_blocks.clone(),
                clock.clone(),
            ),
            queries: QueryEngine::new(store.clone(), day_blocks.clone(), clock.clone()),
            availability: AvailabilityPlanner::new(
                store.clone(),
                day_blocks.clone(),
                clock,
                ScheduleConfig::default(),
            ),
            store,
            day_block_repo,
            day_blocks,
        }
    }
}
