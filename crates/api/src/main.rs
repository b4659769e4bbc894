//! Chairbook - startup check
//!
//! Builds the application context from the environment, runs the schema
//! migrations and prints the health report plus today's availability as
//! JSON. Exits non-zero when the database is unreachable.

use std::io::Write;

use chairbook_lib::{available_slots, get_app_health, AppContext};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let ctx = tokio::task::spawn_blocking(AppContext::new).await??;
    tracing::info!("Chairbook initialized");

    let health = get_app_health(&ctx).await;
    let today = ctx.clock.today().format("%F").to_string();
    let availability = available_slots(&ctx, today).await?;

    let report = json!({ "health": &health, "today": &availability });
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;

    if !health.is_healthy {
        anyhow::bail!("unhealthy: {}", health.message.unwrap_or_default());
    }
    Ok(())
}
