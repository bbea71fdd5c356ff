//! Notification backend abstraction and implementations.
//!
//! The scheduler talks to a `NotificationBackend` trait so the delivery
//! mechanism is swappable: the desktop backend arms tokio timers that show
//! native notifications, and the in-memory backend records registrations for
//! tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use manna_core::constants::APP_NAME;
use manna_core::error::{MannaError, MannaResult};

/// A one-shot notification registered with a backend.
#[derive(Debug, Clone)]
pub struct ScheduledNotification {
    pub id: String,
    pub fire_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
    /// Opaque JSON payload carried alongside the notification.
    pub payload: serde_json::Value,
}

/// Platform-facing notification surface.
///
/// Implementations must hand back an opaque id per registration; the
/// scheduler persists those ids and treats them as the source of truth for
/// what is pending.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Ensure the user has granted notification permission.
    ///
    /// Returns `MannaError::PermissionDenied` when the grant is refused.
    async fn request_permission(&self) -> MannaResult<()>;

    /// Register a single notification to fire at the given instant.
    async fn schedule_one_shot(
        &self,
        fire_at: DateTime<Utc>,
        title: &str,
        body: &str,
        payload: serde_json::Value,
    ) -> MannaResult<String>;

    /// Cancel every pending notification registered by this app.
    async fn cancel_all(&self) -> MannaResult<()>;

    /// Ids of notifications registered and not yet fired or cancelled.
    async fn list_pending(&self) -> Vec<String>;
}

/// Desktop backend: one tokio timer task per pending notification.
///
/// Timers live only as long as the process; on startup the scheduler
/// re-registers from persisted state.
pub struct DesktopBackend {
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl DesktopBackend {
    pub fn new() -> Self {
        Self {
            timers: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for DesktopBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationBackend for DesktopBackend {
    async fn request_permission(&self) -> MannaResult<()> {
        // Desktop notification daemons have no grant step.
        Ok(())
    }

    async fn schedule_one_shot(
        &self,
        fire_at: DateTime<Utc>,
        title: &str,
        body: &str,
        _payload: serde_json::Value,
    ) -> MannaResult<String> {
        let id = Uuid::new_v4().to_string();
        let delay = (fire_at - Utc::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        let title = title.to_string();
        let body = body.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = notify_rust::Notification::new()
                .summary(&title)
                .body(&body)
                .appname(APP_NAME)
                .show();
            if let Err(e) = result {
                warn!("failed to show notification: {e}");
            }
        });

        debug!("armed notification {id} for {fire_at}");
        self.timers.lock().await.insert(id.clone(), handle);
        Ok(id)
    }

    async fn cancel_all(&self) -> MannaResult<()> {
        let mut timers = self.timers.lock().await;
        let count = timers.len();
        for (_, handle) in timers.drain() {
            handle.abort();
        }
        if count > 0 {
            info!("cancelled {count} pending notification timer(s)");
        }
        Ok(())
    }

    async fn list_pending(&self) -> Vec<String> {
        let mut timers = self.timers.lock().await;
        timers.retain(|_, handle| !handle.is_finished());
        timers.keys().cloned().collect()
    }
}

/// In-memory backend recording registrations, for tests.
#[derive(Default)]
pub struct MemoryBackend {
    pending: Mutex<Vec<ScheduledNotification>>,
    permission_granted: std::sync::atomic::AtomicBool,
    fail_after: Mutex<Option<usize>>,
}

impl MemoryBackend {
    pub fn new() -> Arc<Self> {
        let backend = Self {
            pending: Mutex::new(Vec::new()),
            permission_granted: std::sync::atomic::AtomicBool::new(true),
            fail_after: Mutex::new(None),
        };
        Arc::new(backend)
    }

    /// Control whether `request_permission` succeeds.
    pub fn set_permission_granted(&self, granted: bool) {
        self.permission_granted
            .store(granted, std::sync::atomic::Ordering::SeqCst);
    }

    /// Make `schedule_one_shot` fail once `n` registrations have succeeded.
    pub async fn fail_after(&self, n: usize) {
        *self.fail_after.lock().await = Some(n);
    }

    /// Snapshot of currently pending registrations.
    pub async fn pending(&self) -> Vec<ScheduledNotification> {
        self.pending.lock().await.clone()
    }
}

#[async_trait]
impl NotificationBackend for MemoryBackend {
    async fn request_permission(&self) -> MannaResult<()> {
        if self
            .permission_granted
            .load(std::sync::atomic::Ordering::SeqCst)
        {
            Ok(())
        } else {
            Err(MannaError::PermissionDenied)
        }
    }

    async fn schedule_one_shot(
        &self,
        fire_at: DateTime<Utc>,
        title: &str,
        body: &str,
        payload: serde_json::Value,
    ) -> MannaResult<String> {
        let mut pending = self.pending.lock().await;
        if let Some(limit) = *self.fail_after.lock().await {
            if pending.len() >= limit {
                return Err(MannaError::Scheduling(
                    "backend refused registration".to_string(),
                ));
            }
        }

        let id = Uuid::new_v4().to_string();
        pending.push(ScheduledNotification {
            id: id.clone(),
            fire_at,
            title: title.to_string(),
            body: body.to_string(),
            payload,
        });
        Ok(id)
    }

    async fn cancel_all(&self) -> MannaResult<()> {
        self.pending.lock().await.clear();
        Ok(())
    }

    async fn list_pending(&self) -> Vec<String> {
        self.pending
            .lock()
            .await
            .iter()
            .map(|n| n.id.clone())
            .collect()
    }
}
