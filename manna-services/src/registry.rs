//! Service registry: wiring and lifecycle for the application services.
//!
//! Holds the shared infrastructure (config, store, event bus, notification
//! backend), constructs the services in dependency order, and drives init
//! and shutdown.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use manna_core::config::ConfigHandle;
use manna_core::error::{MannaError, MannaResult};
use manna_store::db::Store;

use crate::event_bus::EventBus;
use crate::notify::NotificationBackend;
use crate::recency::RecencyTracker;
use crate::scheduler::SchedulerService;
use crate::service::{Service, ServiceState};
use crate::settings::SettingsService;

/// Central registry that wires and manages the application services.
pub struct ServiceRegistry {
    pub config: ConfigHandle,
    pub store: Store,
    pub event_bus: EventBus,
    settings: Arc<RwLock<SettingsService>>,
    scheduler: Arc<RwLock<SchedulerService>>,
}

impl ServiceRegistry {
    /// Wire up all services against the given infrastructure.
    pub async fn new(
        config: ConfigHandle,
        store: Store,
        backend: Arc<dyn NotificationBackend>,
    ) -> Self {
        let event_bus = EventBus::new(64);
        let (recency_window, default_topic) = {
            let cfg = config.read().await;
            (cfg.delivery.recency_window, cfg.delivery.default_topic.clone())
        };

        let settings = SettingsService::new(store.clone(), event_bus.clone());
        let tracker = RecencyTracker::new(store.clone(), recency_window, &default_topic);
        let scheduler = SchedulerService::new(
            config.clone(),
            store.clone(),
            backend,
            event_bus.clone(),
            tracker,
        );

        Self {
            config,
            store,
            event_bus,
            settings: Arc::new(RwLock::new(settings)),
            scheduler: Arc::new(RwLock::new(scheduler)),
        }
    }

    /// Initialize all services in dependency order.
    pub async fn init_all(&self) -> MannaResult<()> {
        init_service(&mut *self.settings.write().await)?;
        init_service(&mut *self.scheduler.write().await)?;
        info!("all services initialized");
        Ok(())
    }

    /// Shut down all services in reverse order.
    pub async fn shutdown_all(&self) -> MannaResult<()> {
        shutdown_service(&mut *self.scheduler.write().await);
        shutdown_service(&mut *self.settings.write().await);
        info!("all services shut down");
        Ok(())
    }

    /// Health status of every service.
    pub async fn health_check(&self) -> Vec<(String, ServiceState, bool)> {
        let settings = self.settings.read().await;
        let scheduler = self.scheduler.read().await;
        vec![
            (
                settings.name().to_string(),
                settings.state(),
                settings.is_healthy(),
            ),
            (
                scheduler.name().to_string(),
                scheduler.state(),
                scheduler.is_healthy(),
            ),
        ]
    }

    pub fn settings(&self) -> Arc<RwLock<SettingsService>> {
        self.settings.clone()
    }

    pub fn scheduler(&self) -> Arc<RwLock<SchedulerService>> {
        self.scheduler.clone()
    }
}

fn init_service(svc: &mut dyn Service) -> MannaResult<()> {
    let name = svc.name().to_string();
    info!("initializing service: {name}");
    svc.init()
        .map_err(|e| {
            error!("failed to initialize service {name}: {e}");
            MannaError::ServiceInit(format!("{name}: {e}"))
        })
}

fn shutdown_service(svc: &mut dyn Service) {
    let name = svc.name().to_string();
    if let Err(e) = svc.shutdown() {
        error!("error shutting down service {name}: {e}");
        // Continue shutting down the rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manna_core::config::AppConfig;
    use tempfile::TempDir;

    use crate::notify::MemoryBackend;

    async fn registry() -> (ServiceRegistry, TempDir) {
        let dir = TempDir::new().unwrap();
        let db_config = manna_core::config::DatabaseConfig::default();
        let store = Store::init(&dir.path().join("test.db"), &db_config).unwrap();
        let config = ConfigHandle::new(AppConfig::default());
        let registry = ServiceRegistry::new(config, store, MemoryBackend::new()).await;
        (registry, dir)
    }

    #[tokio::test]
    async fn test_init_and_shutdown() {
        let (registry, _dir) = registry().await;
        registry.init_all().await.unwrap();

        let health = registry.health_check().await;
        assert_eq!(health.len(), 2);
        for (name, state, healthy) in &health {
            assert!(healthy, "service {name} is not healthy (state: {state})");
        }

        registry.shutdown_all().await.unwrap();
        for (_, state, _) in registry.health_check().await {
            assert_eq!(state, ServiceState::Stopped);
        }
    }

    #[tokio::test]
    async fn test_configured_default_topic_reaches_delivery() {
        let dir = TempDir::new().unwrap();
        let db_config = manna_core::config::DatabaseConfig::default();
        let store = Store::init(&dir.path().join("test.db"), &db_config).unwrap();

        let mut app_config = AppConfig::default();
        app_config.delivery.default_topic = "peace".into();
        let config = ConfigHandle::new(app_config);

        let backend = MemoryBackend::new();
        let registry = ServiceRegistry::new(config, store, backend.clone()).await;
        registry.init_all().await.unwrap();

        registry
            .scheduler()
            .read()
            .await
            .reschedule("prosperity", 2)
            .await
            .unwrap();

        let peace_refs = crate::verses::references_for("peace");
        for n in backend.pending().await {
            let reference = n.payload["reference"].as_str().unwrap();
            assert!(peace_refs.contains(&reference.to_string()));
        }
    }

    #[tokio::test]
    async fn test_services_share_store() {
        let (registry, _dir) = registry().await;
        registry.init_all().await.unwrap();

        registry.settings().read().await.save("joy", 2).unwrap();
        let ids = registry
            .scheduler()
            .read()
            .await
            .reschedule_from_settings()
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);
    }
}
