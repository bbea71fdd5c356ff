//! Daemon command - keep timers armed and refresh the schedule daily.
//!
//! Desktop notification timers only live as long as the process, so the
//! daemon stays in the foreground: on startup it re-registers the schedule
//! from saved settings, then repeats the refresh shortly after each local
//! midnight.

use chrono::{Duration as ChronoDuration, Local, Timelike};
use tracing::{info, warn};

use manna_core::config::ConfigHandle;
use manna_core::error::MannaResult;

pub async fn run(config: ConfigHandle) -> MannaResult<()> {
    let registry = super::build_registry(&config).await?;

    info!("daemon started");
    loop {
        match registry
            .scheduler()
            .read()
            .await
            .reschedule_from_settings()
            .await
        {
            Ok(ids) if ids.is_empty() => {
                info!("no schedule registered; run `manna setup` first");
            }
            Ok(ids) => {
                info!("daily refresh: {} notification(s) armed", ids.len());
            }
            Err(e) => {
                // Keep running; the next refresh may succeed.
                warn!("daily refresh failed: {e}");
            }
        }

        let sleep_for = until_next_refresh();
        info!("next refresh in {}s", sleep_for.as_secs());
        tokio::select! {
            _ = tokio::time::sleep(sleep_for) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                registry.scheduler().read().await.cancel_all().await?;
                registry.shutdown_all().await?;
                return Ok(());
            }
        }
    }
}

/// Time until one minute past the next local midnight.
fn until_next_refresh() -> std::time::Duration {
    let now = Local::now();
    let since_midnight = ChronoDuration::seconds(i64::from(now.num_seconds_from_midnight()));
    let next = now - since_midnight + ChronoDuration::days(1) + ChronoDuration::minutes(1);
    (next - now).to_std().unwrap_or(std::time::Duration::from_secs(60))
}
