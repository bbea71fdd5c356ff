//! Setup command - choose a topic and daily frequency, register a schedule.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use manna_core::config::ConfigHandle;
use manna_core::error::{MannaError, MannaResult};
use manna_services::verses::available_topics;

use crate::OutputFormat;

pub async fn run(
    config: ConfigHandle,
    topic: Option<String>,
    per_day: Option<u32>,
    format: OutputFormat,
) -> MannaResult<()> {
    let topics = available_topics();

    let topic = match topic {
        Some(t) => t,
        None => {
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Which topic speaks to you?")
                .items(&topics)
                .default(0)
                .interact()
                .map_err(|e| MannaError::Internal(format!("prompt failed: {e}")))?;
            topics[selection].clone()
        }
    };

    let per_day = match per_day {
        Some(n) => n,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("How many messages per day?")
            .default(3u32)
            .interact_text()
            .map_err(|e| MannaError::Internal(format!("prompt failed: {e}")))?,
    };

    let registry = super::build_registry(&config).await?;
    let scheduler = registry.scheduler();

    // Permission first: a denial must leave the setup flag untouched.
    scheduler.read().await.ensure_permission().await?;

    let settings = registry.settings().read().await.save(&topic, per_day)?;
    let ids = scheduler.read().await.reschedule(&topic, per_day).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "topic": settings.topic,
                "messages_per_day": settings.messages_per_day,
                "scheduled": ids.len(),
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        OutputFormat::Text => {
            println!(
                "{} Setup complete: {} message(s) per day on {}.",
                style("\u{2713}").green(),
                per_day,
                style(&topic).bold()
            );
            println!("  {} notification(s) scheduled.", ids.len());
        }
    }

    registry.shutdown_all().await?;
    Ok(())
}
