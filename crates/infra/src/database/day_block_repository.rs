//! SQLite-backed implementation of the `DayBlockRepository` port.
//!
//! Every mutation is a single-row statement keyed by day; the primary key
//! makes "already blocked" detection atomic.

use std::sync::Arc;

use chairbook_core::DayBlockRepository;
use chairbook_domain::{ChairbookError, DayBlock, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::manager::{map_sql_error, DbManager};
use crate::errors::is_constraint_violation;

pub struct SqliteDayBlockRepository {
    db: Arc<DbManager>,
}

impl SqliteDayBlockRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

impl DayBlockRepository for SqliteDayBlockRepository {
    fn insert(&self, block: &DayBlock) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO day_blocks (day, reason, created_at) VALUES (?1, ?2, ?3)",
            params![block.day, block.reason, block.created_at],
        )
        .map_err(|err| {
            if is_constraint_violation(&err) {
                ChairbookError::Conflict(format!("day {} is already blocked", block.day))
            } else {
                map_sql_error(err)
            }
        })?;
        Ok(())
    }

    fn delete(&self, day: NaiveDate) -> Result<bool> {
        let conn = self.db.get_connection()?;
        let removed = conn
            .execute("DELETE FROM day_blocks WHERE day = ?1", params![day])
            .map_err(map_sql_error)?;
        Ok(removed > 0)
    }

    fn find(&self, day: NaiveDate) -> Result<Option<DayBlock>> {
        let conn = self.db.get_connection()?;
        conn.query_row(
            "SELECT day, reason, created_at FROM day_blocks WHERE day = ?1",
            params![day],
            map_day_block_row,
        )
        .optional()
        .map_err(map_sql_error)
    }

    fn list(&self) -> Result<Vec<DayBlock>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn
            .prepare("SELECT day, reason, created_at FROM day_blocks ORDER BY day ASC")
            .map_err(map_sql_error)?;
        let blocks = stmt
            .query_map([], map_day_block_row)
            .map_err(map_sql_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sql_error)?;

        debug!(count = blocks.len(), "day blocks loaded");
        Ok(blocks)
    }
}

fn map_day_block_row(row: &Row<'_>) -> rusqlite::Result<DayBlock> {
    Ok(DayBlock {
        day: row.get::<_, NaiveDate>(0)?,
        reason: row.get(1)?,
        created_at: row.get::<_, DateTime<Utc>>(2)?,
    })
}
