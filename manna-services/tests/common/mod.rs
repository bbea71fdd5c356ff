//! Shared test utilities for integration tests.

use std::sync::Arc;

use manna_core::config::{AppConfig, ConfigHandle, DatabaseConfig};
use manna_services::event_bus::EventBus;
use manna_services::notify::MemoryBackend;
use manna_services::recency::RecencyTracker;
use manna_services::scheduler::SchedulerService;
use manna_services::settings::SettingsService;
use manna_store::db::Store;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

/// Create a temporary key-value store.
/// Returns the Store and the TempDir (must be held alive for the duration of the test).
pub fn create_test_store() -> (Store, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::default();
    let store = Store::init(&path, &config).expect("failed to init test store");
    (store, dir)
}

/// Create a ConfigHandle wrapping a default config.
pub fn create_test_config_handle() -> ConfigHandle {
    ConfigHandle::new(AppConfig::default())
}

/// Create an EventBus with a small buffer suitable for tests.
pub fn create_test_event_bus() -> EventBus {
    EventBus::new(64)
}

/// Full scheduler wiring over an in-memory backend and a seeded rng.
pub fn create_test_scheduler(
    store: Store,
    backend: Arc<MemoryBackend>,
    event_bus: EventBus,
) -> SchedulerService {
    let tracker = RecencyTracker::new(store.clone(), 10, "love");
    SchedulerService::new(
        create_test_config_handle(),
        store,
        backend,
        event_bus,
        tracker,
    )
    .with_rng(StdRng::seed_from_u64(2024))
}

/// Settings service over the same store.
#[allow(dead_code)]
pub fn create_test_settings(store: Store, event_bus: EventBus) -> SettingsService {
    SettingsService::new(store, event_bus)
}
