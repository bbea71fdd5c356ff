//! Reset command - cancel the schedule and clear preferences.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use manna_core::config::ConfigHandle;
use manna_core::error::{MannaError, MannaResult};

pub async fn run(config: ConfigHandle, yes: bool, purge: bool) -> MannaResult<()> {
    if !yes {
        let prompt = if purge {
            "Cancel all notifications and wipe the entire store?"
        } else {
            "Cancel all notifications and reset settings?"
        };
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| MannaError::Internal(format!("prompt failed: {e}")))?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let registry = super::build_registry(&config).await?;
    registry.scheduler().read().await.cancel_all().await?;

    if purge {
        registry.store.reset()?;
        println!(
            "{} Store wiped: settings, recent verses, and schedule removed.",
            style("\u{2713}").green()
        );
    } else {
        let settings = registry.settings().read().await.reset()?;
        println!(
            "{} Reset complete. Topic kept: {}.",
            style("\u{2713}").green(),
            style(&settings.topic).bold()
        );
    }

    registry.shutdown_all().await?;
    Ok(())
}
