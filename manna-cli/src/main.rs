//! Manna CLI - daily verse notifications from the terminal.
//!
//! Schedules rephrased scripture as native notifications: pick a topic and a
//! daily frequency, and the scheduler registers randomized delivery times
//! within the configured window. The daemon command keeps timers armed and
//! refreshes the schedule every day.

mod commands;

use clap::{Parser, Subcommand};
use tracing::info;

use manna_core::config::{AppConfig, ConfigHandle};
use manna_core::error::MannaResult;
use manna_core::logging;
use manna_core::platform::Platform;

/// Manna - daily verse notification scheduler.
#[derive(Parser)]
#[command(
    name = "manna",
    version,
    about = "Daily verse notifications",
    long_about = "Delivers rephrased Bible verses as scheduled notifications.\n\
                   Choose a topic and how many messages you want per day; delivery\n\
                   times are randomized within the configured daily window."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a topic and daily frequency, then register the first schedule.
    Setup {
        /// Verse topic (love, peace, strength, hope, faith, joy, guidance, comfort).
        #[arg(short, long)]
        topic: Option<String>,
        /// Number of notifications per day.
        #[arg(short = 'n', long)]
        per_day: Option<u32>,
    },
    /// Show current settings and the pending schedule.
    Status,
    /// Replace the schedule using the saved settings.
    Reschedule {
        /// Override the saved topic for this schedule.
        #[arg(short, long)]
        topic: Option<String>,
        /// Override the saved frequency for this schedule.
        #[arg(short = 'n', long)]
        per_day: Option<u32>,
    },
    /// Cancel every pending notification.
    Cancel,
    /// Reset settings and cancel all pending notifications.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
        /// Also wipe the entire store (recent verses and all records).
        #[arg(long)]
        purge: bool,
    },
    /// List available topics.
    Topics,
    /// Preview rephrased messages without scheduling anything.
    Preview {
        /// Topic to preview.
        topic: String,
        /// Number of messages to generate.
        #[arg(short = 'n', long, default_value = "3")]
        count: u32,
    },
    /// Run in the foreground, refreshing the schedule daily.
    Daemon,
}

#[tokio::main]
async fn main() -> MannaResult<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let log_dir = Platform::data_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("logs");
    let _guard = logging::init_logging(log_level, &log_dir, false)?;

    let config_path = cli.config.as_deref().map(std::path::Path::new);
    let config = if let Some(path) = config_path {
        AppConfig::load_from_file(path)?
    } else {
        AppConfig::load_default()?
    };
    config.validate()?;

    let config_handle = ConfigHandle::new(config);

    info!("Manna CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Setup { topic, per_day } => {
            commands::setup::run(config_handle, topic, per_day, cli.format).await
        }
        Commands::Status => commands::status::run(config_handle, cli.format).await,
        Commands::Reschedule { topic, per_day } => {
            commands::reschedule::run(config_handle, topic, per_day, cli.format).await
        }
        Commands::Cancel => commands::reschedule::cancel(config_handle).await,
        Commands::Reset { yes, purge } => commands::reset::run(config_handle, yes, purge).await,
        Commands::Topics => commands::topics::run(cli.format).await,
        Commands::Preview { topic, count } => {
            commands::preview::run(topic, count, cli.format).await
        }
        Commands::Daemon => commands::daemon::run(config_handle).await,
    }
}
