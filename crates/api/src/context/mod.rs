//! Application context - dependency injection container

use std::sync::Arc;

use chairbook_core::{
    AppointmentLifecycle, AvailabilityPlanner, CalendarClock, DayBlockRegistry, QueryEngine,
    SystemCalendarClock,
};
use chairbook_domain::{Config, Result};
use chairbook_infra::config::{load, probe_config_paths};
use chairbook_infra::{DbManager, SqliteAppointmentStore, SqliteDayBlockRepository};
use tracing::{info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};
use crate::utils::logging::init_tracing;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub clock: Arc<dyn CalendarClock>,

    // Services
    pub day_blocks: Arc<DayBlockRegistry>,
    pub lifecycle: Arc<AppointmentLifecycle>,
    pub queries: Arc<QueryEngine>,
    pub availability: Arc<AvailabilityPlanner>,
}

impl AppContext {
    /// Build the context from the process environment.
    ///
    /// Reads `.env` if present, loads configuration (environment first, then
    /// a config file), installs the tracing subscriber and opens the
    /// database. With no configuration source at all the defaults are used.
    pub fn new() -> Result<Self> {
        let dotenv = dotenvy::dotenv();

        let config = if std::env::var_os("CHAIRBOOK_DB_PATH").is_none()
            && probe_config_paths().is_none()
        {
            Config::default()
        } else {
            load()?
        };

        init_tracing(&config.logging);
        match dotenv {
            Ok(path) => info!(path = %path.display(), "loaded .env"),
            Err(err) => warn!(error = %err, "no .env file loaded"),
        }

        Self::new_with_config(config)
    }

    /// Build the context from an explicit configuration, reading dates from
    /// the system calendar.
    pub fn new_with_config(config: Config) -> Result<Self> {
        Self::new_with_clock(config, Arc::new(SystemCalendarClock))
    }

    /// Build the context with a caller-supplied calendar.
    ///
    /// Tests use this to pin "today" so past-date rules are deterministic.
    pub fn new_with_clock(config: Config, clock: Arc<dyn CalendarClock>) -> Result<Self> {
        config.validate()?;

        let db = Arc::new(DbManager::from_config(&config.database)?);
        db.run_migrations()?;

        let store = Arc::new(SqliteAppointmentStore::new(Arc::clone(&db)));
        let day_block_repo = Arc::new(SqliteDayBlockRepository::new(Arc::clone(&db)));

        let day_blocks = Arc::new(DayBlockRegistry::new(day_block_repo, Arc::clone(&clock)));
        let lifecycle = Arc::new(AppointmentLifecycle::new(
            store.clone(),
            Arc::clone(&day_blocks),
            Arc::clone(&clock),
        ));
        let queries =
            Arc::new(QueryEngine::new(store.clone(), Arc::clone(&day_blocks), Arc::clone(&clock)));
        let availability = Arc::new(AvailabilityPlanner::new(
            store,
            Arc::clone(&day_blocks),
            Arc::clone(&clock),
            config.schedule.clone(),
        ));

        info!(
            db_path = %db.path().display(),
            pool_size = config.database.pool_size,
            today = %clock.today(),
            "application context ready"
        );

        Ok(Self { config, db, clock, day_blocks, lifecycle, queries, availability })
    }

    /// Health of every component the commands depend on.
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new().add_component(self.check_database_health().await);
        status.calculate_score();
        status
    }

    /// Round trip to the database on the blocking pool.
    async fn check_database_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(e)) => {
                warn!(error = %e, "database health check failed");
                ComponentHealth::unhealthy("database", format!("query failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "database health check task panicked");
                ComponentHealth::unhealthy("database", format!("task panic: {e}"))
            }
        }
    }
}
