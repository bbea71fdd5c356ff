//! Status command - show settings, schedule, and store state.

use console::style;

use manna_core::config::ConfigHandle;
use manna_core::error::MannaResult;
use manna_store::models::UserSettings;

use crate::OutputFormat;

pub async fn run(config: ConfigHandle, format: OutputFormat) -> MannaResult<()> {
    let store = super::init_store(&config).await?;
    let settings = {
        let conn = store.conn()?;
        UserSettings::load(&conn)?
    };

    let backend = std::sync::Arc::new(manna_services::notify::DesktopBackend::new());
    let registry =
        manna_services::registry::ServiceRegistry::new(config.clone(), store.clone(), backend)
            .await;
    registry.init_all().await?;

    let persisted = registry.scheduler().read().await.persisted_ids()?;
    let health = registry.health_check().await;

    let cfg = config.read().await;
    let db_path = cfg.effective_db_path()?;
    let window = (cfg.delivery.window_start_hour, cfg.delivery.window_end_hour);
    drop(cfg);

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "topic": settings.topic,
                "messages_per_day": settings.messages_per_day,
                "setup_complete": settings.is_setup,
                "scheduled_ids": persisted,
                "delivery_window": format!("{:02}:00-{:02}:00", window.0, window.1),
                "database": db_path.display().to_string(),
                "services": health
                    .iter()
                    .map(|(name, state, healthy)| serde_json::json!({
                        "name": name,
                        "state": state.to_string(),
                        "healthy": healthy,
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        OutputFormat::Text => {
            println!("{}", style("Settings").bold().underlined());
            println!("  Topic:     {}", settings.topic);
            println!("  Per day:   {}", settings.messages_per_day);
            println!(
                "  Setup:     {}",
                if settings.is_setup {
                    style("complete").green().to_string()
                } else {
                    style("pending").yellow().to_string()
                }
            );

            println!();
            println!("{}", style("Schedule").bold().underlined());
            println!("  Window:    {:02}:00-{:02}:00", window.0, window.1);
            println!("  Scheduled: {} notification id(s)", persisted.len());

            println!();
            println!("{}", style("Store").bold().underlined());
            println!("  Path:      {}", db_path.display());
            println!("  Keys:      {}", store.key_count()?);

            println!();
            println!("{}", style("Services").bold().underlined());
            for (name, state, healthy) in &health {
                let mark = if *healthy {
                    style("\u{2713}").green().to_string()
                } else {
                    style("\u{2717}").red().to_string()
                };
                println!("  {mark} {name} ({state})");
            }
        }
    }

    registry.shutdown_all().await?;
    Ok(())
}
