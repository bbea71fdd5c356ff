//! CLI command implementations.

pub mod daemon;
pub mod preview;
pub mod reschedule;
pub mod reset;
pub mod setup;
pub mod status;
pub mod topics;

use std::sync::Arc;

use manna_core::config::ConfigHandle;
use manna_core::error::MannaResult;
use manna_services::notify::DesktopBackend;
use manna_services::registry::ServiceRegistry;
use manna_store::db::Store;

/// Helper to initialize the store from config.
pub async fn init_store(config: &ConfigHandle) -> MannaResult<Store> {
    let cfg = config.read().await;
    let db_path = cfg.effective_db_path()?;
    let db_config = cfg.database.clone();
    drop(cfg);
    Store::init(&db_path, &db_config)
}

/// Wire up the full service registry over the desktop notification backend.
pub async fn build_registry(config: &ConfigHandle) -> MannaResult<ServiceRegistry> {
    let store = init_store(config).await?;
    let backend = Arc::new(DesktopBackend::new());
    let registry = ServiceRegistry::new(config.clone(), store, backend).await;
    registry.init_all().await?;
    Ok(registry)
}
