//! Manna Store - Key-value persistence and persisted record models.
//!
//! This crate provides the storage layer: a pooled SQLite database holding a
//! single key-value table of JSON-encoded records, plus typed models for the
//! three records the application persists:
//! - `UserSettings` (topic, frequency, setup flag)
//! - `RecentVerses` (sliding window of recently used verse references)
//! - `ScheduledIds` (opaque ids of currently registered notifications)

pub mod db;
pub mod kv;
pub mod models;
pub mod schema;

// Re-export key types
pub use db::Store;
pub use kv::Kv;
pub use models::{RecentVerses, ScheduledIds, UserSettings};
