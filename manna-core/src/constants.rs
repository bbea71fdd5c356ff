//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "Manna";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Title used for every delivered notification.
pub const NOTIFICATION_TITLE: &str = "\u{2728} A Message from God";

/// Topic used when the requested topic has no verse list.
pub const DEFAULT_TOPIC: &str = "love";

/// Maximum number of recently used verse references kept for
/// repeat avoidance (sliding FIFO window).
pub const MAX_RECENT_VERSES: usize = 10;

/// Default delivery window start hour (inclusive, local time).
pub const DEFAULT_WINDOW_START_HOUR: u32 = 8;

/// Default delivery window end hour (exclusive, local time).
pub const DEFAULT_WINDOW_END_HOUR: u32 = 21;
