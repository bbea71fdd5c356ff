//! Scheduler: replaces the full notification schedule in one sweep.
//!
//! A reschedule is always a full replacement: cancel everything pending,
//! generate fresh time slots, pick a recency-unique message per slot,
//! register each with the backend, and persist the returned ids. There is no
//! incremental editing of an existing schedule.

use std::sync::Arc;

use chrono::{Local, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use manna_core::config::ConfigHandle;
use manna_core::error::MannaResult;
use manna_store::db::Store;
use manna_store::models::{ScheduledIds, UserSettings};

use crate::event_bus::{AppEvent, EventBus};
use crate::notify::NotificationBackend;
use crate::recency::RecencyTracker;
use crate::rephrase::RephrasedMessage;
use crate::service::{Service, ServiceState};
use crate::slots::{generate_slots, DeliveryWindow};

pub struct SchedulerService {
    state: ServiceState,
    config: ConfigHandle,
    store: Store,
    backend: Arc<dyn NotificationBackend>,
    event_bus: EventBus,
    tracker: RecencyTracker,
    rng: Arc<Mutex<StdRng>>,
}

impl SchedulerService {
    pub fn new(
        config: ConfigHandle,
        store: Store,
        backend: Arc<dyn NotificationBackend>,
        event_bus: EventBus,
        tracker: RecencyTracker,
    ) -> Self {
        Self {
            state: ServiceState::Created,
            config,
            store,
            backend,
            event_bus,
            tracker,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Replace the rng, for deterministic tests.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    /// Check notification permission without touching the schedule.
    ///
    /// Setup flows call this before persisting anything, so a denial leaves
    /// no half-configured state behind.
    pub async fn ensure_permission(&self) -> MannaResult<()> {
        self.backend.request_permission().await
    }

    /// Replace the entire schedule with `count` notifications for `topic`.
    ///
    /// Cancels everything pending first, so the pending set never mixes two
    /// schedules. A registration failure aborts the remainder; ids registered
    /// before the failure stay persisted so the next sweep can cancel them.
    pub async fn reschedule(&self, topic: &str, count: u32) -> MannaResult<Vec<String>> {
        self.backend.request_permission().await?;

        self.cancel_pending().await?;

        if count == 0 {
            info!("reschedule: count is 0, nothing to register");
            self.event_bus.emit(AppEvent::ScheduleReplaced {
                topic: topic.to_string(),
                count: 0,
            });
            return Ok(Vec::new());
        }

        let (window, title) = {
            let config = self.config.read().await;
            (
                DeliveryWindow::new(
                    config.delivery.window_start_hour,
                    config.delivery.window_end_hour,
                )?,
                config.delivery.title.clone(),
            )
        };

        let slots = {
            let mut rng = self.rng.lock().await;
            generate_slots(count, window, Local::now(), &mut *rng)
        };

        let mut ids = Vec::with_capacity(slots.len());
        for slot in &slots {
            let message = {
                let mut rng = self.rng.lock().await;
                self.tracker.pick_unique(topic, &mut *rng)
            };

            let fire_at = slot.with_timezone(&Utc);
            let result = self
                .backend
                .schedule_one_shot(fire_at, &title, &message.rephrased, payload_for(&message))
                .await;

            match result {
                Ok(id) => {
                    debug!("registered notification {id} ({}) at {fire_at}", message.reference);
                    self.event_bus.emit(AppEvent::NotificationRegistered {
                        id: id.clone(),
                        reference: message.reference.clone(),
                    });
                    ids.push(id);
                }
                Err(e) => {
                    warn!("reschedule aborted after {} registration(s): {e}", ids.len());
                    self.persist_ids(&ids)?;
                    return Err(e);
                }
            }
        }

        self.persist_ids(&ids)?;
        info!("schedule replaced: {} notification(s) for topic {topic}", ids.len());
        self.event_bus.emit(AppEvent::ScheduleReplaced {
            topic: topic.to_string(),
            count: ids.len(),
        });
        Ok(ids)
    }

    /// Reschedule from the persisted user settings.
    ///
    /// Used by the daily refresh: keeps notifications flowing without the
    /// user re-running setup. A no-op when setup has not been completed.
    pub async fn reschedule_from_settings(&self) -> MannaResult<Vec<String>> {
        let settings = self.load_settings()?;
        if !settings.is_setup {
            debug!("reschedule skipped: setup not completed");
            return Ok(Vec::new());
        }
        self.reschedule(&settings.topic, settings.messages_per_day)
            .await
    }

    /// Cancel every pending notification and forget the persisted ids.
    pub async fn cancel_all(&self) -> MannaResult<()> {
        self.cancel_pending().await?;
        info!("all pending notifications cancelled");
        self.event_bus.emit(AppEvent::NotificationsCancelled);
        Ok(())
    }

    /// Number of notifications the backend still holds.
    pub async fn pending_count(&self) -> usize {
        self.backend.list_pending().await.len()
    }

    /// Ids persisted at the last successful registration sweep.
    pub fn persisted_ids(&self) -> MannaResult<Vec<String>> {
        let conn = self.store.conn()?;
        Ok(ScheduledIds::load(&conn)?.ids().to_vec())
    }

    async fn cancel_pending(&self) -> MannaResult<()> {
        self.backend.cancel_all().await?;
        let conn = self.store.conn()?;
        ScheduledIds::clear(&conn)
    }

    fn persist_ids(&self, ids: &[String]) -> MannaResult<()> {
        let conn = self.store.conn()?;
        ScheduledIds::new(ids.to_vec()).save(&conn)
    }

    fn load_settings(&self) -> MannaResult<UserSettings> {
        let conn = self.store.conn()?;
        UserSettings::load(&conn)
    }
}

/// JSON payload attached to each notification, matching the persisted shape
/// the original app put in its notification data field.
fn payload_for(message: &RephrasedMessage) -> serde_json::Value {
    serde_json::json!({
        "reference": message.reference,
        "originalText": message.text,
    })
}

impl Service for SchedulerService {
    fn name(&self) -> &str {
        "scheduler"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> MannaResult<()> {
        self.state = ServiceState::Running;
        info!("scheduler service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> MannaResult<()> {
        self.state = ServiceState::Stopped;
        Ok(())
    }
}
