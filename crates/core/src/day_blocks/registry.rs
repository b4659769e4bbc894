//! Day-block registry service

use std::sync::Arc;

use chairbook_domain::{ChairbookError, DayBlock, DayBlockStatus, Result};
use chrono::NaiveDate;
use tracing::info;

use super::ports::DayBlockRepository;
use crate::clock::CalendarClock;
use crate::input::{optional_text, resolve_date};

/// Marks whole days closed and answers whether a day is closed.
pub struct DayBlockRegistry {
    repository: Arc<dyn DayBlockRepository>,
    clock: Arc<dyn CalendarClock>,
}

impl DayBlockRegistry {
    pub fn new(repository: Arc<dyn DayBlockRepository>, clock: Arc<dyn CalendarClock>) -> Self {
        Self { repository, clock }
    }

    /// Block `day`. A blank reason is stored as no reason.
    ///
    /// Past days may be blocked; existing appointments on the day are left
    /// untouched.
    pub fn block(&self, day: NaiveDate, reason: Option<&str>) -> Result<DayBlock> {
        let block =
            DayBlock { day, reason: optional_text(reason), created_at: self.clock.now() };
        self.repository.insert(&block)?;
        info!(%day, reason = ?block.reason, "day blocked");
        Ok(block)
    }

    /// [`block`](Self::block) for a raw date token.
    pub fn block_input(&self, date: &str, reason: Option<&str>) -> Result<DayBlock> {
        self.block(resolve_date(date, self.clock.today())?, reason)
    }

    pub fn unblock(&self, day: NaiveDate) -> Result<()> {
        if !self.repository.delete(day)? {
            return Err(ChairbookError::not_found(format!("day {day} is not blocked")));
        }
        info!(%day, "day unblocked");
        Ok(())
    }

    pub fn unblock_input(&self, date: &str) -> Result<()> {
        self.unblock(resolve_date(date, self.clock.today())?)
    }

    pub fn find(&self, day: NaiveDate) -> Result<Option<DayBlock>> {
        self.repository.find(day)
    }

    pub fn is_blocked(&self, day: NaiveDate) -> Result<DayBlockStatus> {
        Ok(DayBlockStatus::from(self.find(day)?.as_ref()))
    }

    pub fn is_blocked_input(&self, date: &str) -> Result<DayBlockStatus> {
        self.is_blocked(resolve_date(date, self.clock.today())?)
    }

    /// Fail with `DayBlocked` if `day` is closed.
    pub fn ensure_open(&self, day: NaiveDate) -> Result<()> {
        match self.find(day)? {
            Some(block) => Err(ChairbookError::DayBlocked { day, reason: block.reason }),
            None => Ok(()),
        }
    }

    pub fn list(&self) -> Result<Vec<DayBlock>> {
        self.repository.list()
    }
}
