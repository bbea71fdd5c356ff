//! Application configuration management.
//!
//! Handles loading, saving, and accessing application configuration:
//! delivery window, storage location, and logging. Configuration is
//! persisted as TOML on disk; user state (topic, frequency) lives in the
//! key-value store, not here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::constants;
use crate::error::{MannaError, MannaResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Notification delivery settings.
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Key-value store settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Notification delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// First hour of the daily delivery window (inclusive, local time).
    #[serde(default = "default_window_start")]
    pub window_start_hour: u32,

    /// Last hour of the daily delivery window (exclusive, local time).
    #[serde(default = "default_window_end")]
    pub window_end_hour: u32,

    /// Title used for every notification.
    #[serde(default = "default_title")]
    pub title: String,

    /// Topic used when the requested topic is unknown.
    #[serde(default = "default_topic")]
    pub default_topic: String,

    /// Size of the recently-used-verse exclusion window.
    #[serde(default = "default_recency_window")]
    pub recency_window: usize,
}

/// Key-value store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. If empty, uses default location.
    #[serde(default)]
    pub path: String,

    /// Enable WAL (Write-Ahead Logging) mode. Always recommended.
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Run integrity check on startup.
    #[serde(default = "default_true")]
    pub integrity_check_on_startup: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_window_start() -> u32 {
    constants::DEFAULT_WINDOW_START_HOUR
}

fn default_window_end() -> u32 {
    constants::DEFAULT_WINDOW_END_HOUR
}

fn default_title() -> String {
    constants::NOTIFICATION_TITLE.to_string()
}

fn default_topic() -> String {
    constants::DEFAULT_TOPIC.to_string()
}

fn default_recency_window() -> usize {
    constants::MAX_RECENT_VERSES
}

fn default_true() -> bool {
    true
}

fn default_pool_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delivery: DeliveryConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            window_start_hour: default_window_start(),
            window_end_hour: default_window_end(),
            title: default_title(),
            default_topic: default_topic(),
            recency_window: default_recency_window(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            wal_mode: true,
            pool_size: default_pool_size(),
            integrity_check_on_startup: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> MannaResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> MannaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> MannaResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| MannaError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> MannaResult<PathBuf> {
        Ok(Platform::config_dir()?.join("config.toml"))
    }

    /// Get the effective database path, using the configured path or the default.
    pub fn effective_db_path(&self) -> MannaResult<PathBuf> {
        if self.database.path.is_empty() {
            Ok(Platform::data_dir()?.join("manna.db"))
        } else {
            Ok(PathBuf::from(&self.database.path))
        }
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> MannaResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(Platform::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Validate the delivery section.
    ///
    /// The delivery window must span at least one hour within a single day.
    pub fn validate(&self) -> MannaResult<()> {
        let d = &self.delivery;
        if d.window_start_hour >= d.window_end_hour || d.window_end_hour > 24 {
            return Err(MannaError::InvalidConfig(format!(
                "delivery window {}..{} is empty or out of range",
                d.window_start_hour, d.window_end_hour
            )));
        }
        if d.recency_window == 0 {
            return Err(MannaError::InvalidConfig(
                "recency_window must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Thread-safe configuration holder for shared access across services.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<AppConfig>>,
}

impl ConfigHandle {
    /// Create a new configuration handle.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Read the configuration.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.read().await
    }

    /// Write/update the configuration.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, AppConfig> {
        self.inner.write().await
    }
}
