//! Global error types for the Manna application.
//!
//! All error categories across the application are unified into a single
//! `MannaError` enum with conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using MannaError.
pub type MannaResult<T> = Result<T, MannaError>;

/// Unified error type covering all error categories in Manna.
#[derive(Error, Debug)]
pub enum MannaError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing or invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Persistence errors --
    /// SQLite database error.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection pool error.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Database integrity check failed.
    #[error("database integrity check failed: {0}")]
    IntegrityCheck(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Scheduling errors --
    /// The user declined notification permission.
    #[error("notification permission denied")]
    PermissionDenied,

    /// The notification subsystem rejected a registration.
    #[error("scheduling failed: {0}")]
    Scheduling(String),

    /// Showing or registering a native notification failed.
    #[error("notification error: {0}")]
    Notification(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // -- Service errors --
    /// A service failed to initialize.
    #[error("service init error: {0}")]
    ServiceInit(String),

    /// A service operation failed.
    #[error("service error: {0}")]
    Service(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for MannaError {
    fn from(e: serde_json::Error) -> Self {
        MannaError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for MannaError {
    fn from(e: toml::de::Error) -> Self {
        MannaError::Config(e.to_string())
    }
}

impl MannaError {
    /// Whether this error represents a storage/persistence failure.
    ///
    /// Non-critical callers (the recency tracker) degrade gracefully on
    /// these instead of propagating them.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            MannaError::Database(_)
                | MannaError::Pool(_)
                | MannaError::IntegrityCheck(_)
                | MannaError::Serialization(_)
        )
    }
}
