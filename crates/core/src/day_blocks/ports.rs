//! Port interfaces for day-block storage

use chairbook_domain::{DayBlock, Result};
use chrono::NaiveDate;

/// Day-block persistence, keyed by calendar day.
pub trait DayBlockRepository: Send + Sync {
    /// Store a new block.
    ///
    /// # Errors
    /// `Conflict` when the day is already blocked. The check and the insert
    /// must be a single atomic step.
    fn insert(&self, block: &DayBlock) -> Result<()>;

    /// Returns `false` when the day was not blocked.
    fn delete(&self, day: NaiveDate) -> Result<bool>;

    fn find(&self, day: NaiveDate) -> Result<Option<DayBlock>>;

    /// All blocks, ascending by day.
    fn list(&self) -> Result<Vec<DayBlock>>;
}
