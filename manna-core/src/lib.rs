//! Manna Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other Manna crates:
//! - Application configuration (delivery window, storage, logging)
//! - Global error types covering all error categories
//! - Structured logging with tracing
//! - Platform directory utilities
//! - Common constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{MannaError, MannaResult};
pub use logging::init_logging;
pub use platform::Platform;
