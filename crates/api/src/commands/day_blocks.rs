//! Whole-day block commands
//!
//! Dates accept every form the date normalizer does ("hoje", "25/12/2025",
//! "25122025", ...).

use std::sync::Arc;

use chairbook_domain::{DayBlock, DayBlockStatus, Result};

use crate::context::AppContext;
use crate::utils::command_helpers::run_blocking;

/// All day blocks, earliest day first.
pub async fn list_day_blocks(ctx: &AppContext) -> Result<Vec<DayBlock>> {
    let day_blocks = Arc::clone(&ctx.day_blocks);
    run_blocking("day_blocks::list_day_blocks", move || day_blocks.list()).await
}

/// Close a day to new or moved appointments. Existing appointments on the
/// day are left as they are.
pub async fn block_day(
    ctx: &AppContext,
    date: String,
    reason: Option<String>,
) -> Result<DayBlock> {
    let day_blocks = Arc::clone(&ctx.day_blocks);
    run_blocking("day_blocks::block_day", move || {
        day_blocks.block_input(&date, reason.as_deref())
    })
    .await
}

pub async fn unblock_day(ctx: &AppContext, date: String) -> Result<()> {
    let day_blocks = Arc::clone(&ctx.day_blocks);
    run_blocking("day_blocks::unblock_day", move || day_blocks.unblock_input(&date)).await
}

pub async fn is_day_blocked(ctx: &AppContext, date: String) -> Result<DayBlockStatus> {
    let day_blocks = Arc::clone(&ctx.day_blocks);
    run_blocking("day_blocks::is_day_blocked", move || day_blocks.is_blocked_input(&date)).await
}
