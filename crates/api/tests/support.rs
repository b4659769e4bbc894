//! Shared helpers for `chairbook-app` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chairbook_common::testing::TempDatabase;
use chairbook_core::FixedCalendarClock;
use chairbook_domain::{BookingRequest, Config, DatabaseConfig};
use chairbook_lib::context::AppContext;
use chrono::NaiveDate;

/// A Tuesday, so the default grid is open and the following Friday offers
/// the extended evening times.
pub fn today() -> NaiveDate {
    date(2025, 6, 10)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Application context over a fresh database, with the calendar pinned to
/// [`today`].
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    _temp: TempDatabase,
}

pub fn test_config(temp: &TempDatabase) -> Config {
    Config {
        database: DatabaseConfig {
            path: temp.db_path().to_string_lossy().to_string(),
            pool_size: 4,
            busy_timeout_ms: 5_000,
        },
        ..Config::default()
    }
}

pub fn setup_test_app() -> TestApp {
    let temp = TempDatabase::new("app-test").expect("temp dir should be created");
    let ctx = AppContext::new_with_clock(
        test_config(&temp),
        Arc::new(FixedCalendarClock::new(today())),
    )
    .expect("context should be created");

    TestApp { ctx: Arc::new(ctx), _temp: temp }
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
