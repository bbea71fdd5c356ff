//! Persisted record models.
//!
//! Each model wraps one JSON record in the key-value store and knows how to
//! load and save itself. JSON field names match the original app's records so
//! an existing store remains readable.

pub mod recent_verses;
pub mod scheduled_ids;
pub mod user_settings;

pub use recent_verses::RecentVerses;
pub use scheduled_ids::ScheduledIds;
pub use user_settings::UserSettings;
