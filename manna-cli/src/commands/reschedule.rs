//! Reschedule and cancel commands.

use console::style;

use manna_core::config::ConfigHandle;
use manna_core::error::MannaResult;

use crate::OutputFormat;

/// Replace the schedule, using saved settings unless overridden.
pub async fn run(
    config: ConfigHandle,
    topic: Option<String>,
    per_day: Option<u32>,
    format: OutputFormat,
) -> MannaResult<()> {
    let registry = super::build_registry(&config).await?;

    let saved = registry.settings().read().await.load()?;
    let topic = topic.unwrap_or(saved.topic);
    let per_day = per_day.unwrap_or(saved.messages_per_day);

    let ids = registry
        .scheduler()
        .read()
        .await
        .reschedule(&topic, per_day)
        .await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "topic": topic,
                "scheduled": ids.len(),
                "ids": ids,
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        OutputFormat::Text => {
            println!(
                "{} Scheduled {} notification(s) for {}.",
                style("\u{2713}").green(),
                ids.len(),
                style(&topic).bold()
            );
        }
    }

    registry.shutdown_all().await?;
    Ok(())
}

/// Cancel every pending notification.
pub async fn cancel(config: ConfigHandle) -> MannaResult<()> {
    let registry = super::build_registry(&config).await?;
    registry.scheduler().read().await.cancel_all().await?;
    println!("{} All pending notifications cancelled.", style("\u{2713}").green());
    registry.shutdown_all().await?;
    Ok(())
}
