//! Shared helpers for `chairbook-infra` integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chairbook_common::testing::TempDatabase;
use chairbook_core::{
    AppointmentLifecycle, DayBlockRegistry, FixedCalendarClock, QueryEngine,
};
use chairbook_domain::{AppointmentStatus, BookingRequest, NewAppointment, Slot, SlotTime};
use chairbook_infra::{DbManager, SqliteAppointmentStore, SqliteDayBlockRepository};
use chrono::NaiveDate;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub store: Arc<SqliteAppointmentStore>,
    pub day_blocks: Arc<SqliteDayBlockRepository>,
    _temp: TempDatabase,
}

impl TestDatabase {
    /// Fresh migrated database with a short busy timeout.
    pub fn new() -> Self {
        Self::with_busy_timeout(Duration::from_secs(2))
    }

    pub fn with_busy_timeout(busy_timeout: Duration) -> Self {
        init_test_tracing();
        let temp = TempDatabase::new("infra-test").expect("temp dir should be created");
        let manager = Arc::new(
            DbManager::new(temp.db_path(), 4, busy_timeout).expect("db manager should be created"),
        );
        manager.run_migrations().expect("schema should be created");

        Self {
            store: Arc::new(SqliteAppointmentStore::new(Arc::clone(&manager))),
            day_blocks: Arc::new(SqliteDayBlockRepository::new(Arc::clone(&manager))),
            manager,
            _temp: temp,
        }
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }

    /// Lifecycle and query services over this database.
    pub fn services(&self, today: NaiveDate) -> (AppointmentLifecycle, QueryEngine) {
        let clock = Arc::new(FixedCalendarClock::new(today));
        let registry = Arc::new(DayBlockRegistry::new(self.day_blocks.clone(), clock.clone()));
        (
            AppointmentLifecycle::new(self.store.clone(), registry.clone(), clock.clone()),
            QueryEngine::new(self.store.clone(), registry, clock),
        )
    }
}

/// Send repository logs to the test harness's captured output.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn new_booking(date: NaiveDate, time: &str, status: AppointmentStatus) -> NewAppointment {
    NewAppointment {
        client_name: "Ana".to_string(),
        client_phone: "(11) 99999-8888".to_string(),
        date,
        time: SlotTime::parse(time).expect("valid time"),
        service: Some("Corte".to_string()),
        status,
    }
}

pub fn slot(date: NaiveDate, time: &str) -> Slot {
    Slot::new(date, SlotTime::parse(time).expect("valid time"))
}

pub fn booking(name: &str, date: &str, time: &str) -> BookingRequest {
    BookingRequest {
        client_name: name.to_string(),
        client_phone: "11999998888".to_string(),
        date: date.to_string(),
        time: time.to_string(),
        service: None,
    }
}
