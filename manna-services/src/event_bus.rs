//! Typed event bus for intra-service communication.
//!
//! Uses tokio broadcast channels to decouple services from one another.
//! Any service can emit events without knowing who is listening, and any
//! number of subscribers can independently consume events.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// All application-level event types that flow through the event bus.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Initial setup completed and a first schedule was registered.
    SetupCompleted {
        topic: String,
        messages_per_day: u32,
    },
    /// A full schedule was replaced (cancel sweep + new registrations).
    ScheduleReplaced {
        topic: String,
        count: usize,
    },
    /// A single notification was registered with the backend.
    NotificationRegistered {
        id: String,
        reference: String,
    },
    /// All pending notifications were cancelled.
    NotificationsCancelled,
    /// User settings were reset (frequency zeroed, setup flag cleared).
    SettingsReset,
}

/// Application-wide event bus backed by a tokio broadcast channel.
///
/// Designed for fan-out delivery: every subscriber gets every event.
/// Slow subscribers that fall behind will receive a `Lagged` error
/// and may miss events, which is acceptable for UI-driven consumers.
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<AppEvent>>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Subscribe to receive application events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers.
    pub fn emit(&self, event: AppEvent) {
        let label = event_label(&event);
        match self.sender.send(event) {
            Ok(count) => {
                debug!("event_bus: emitted {label} to {count} subscriber(s)");
            }
            Err(_) => {
                debug!("event_bus: no subscribers for {label}");
            }
        }
    }

    /// Get the current number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Human-readable label for an event (for logging).
fn event_label(event: &AppEvent) -> &'static str {
    match event {
        AppEvent::SetupCompleted { .. } => "SetupCompleted",
        AppEvent::ScheduleReplaced { .. } => "ScheduleReplaced",
        AppEvent::NotificationRegistered { .. } => "NotificationRegistered",
        AppEvent::NotificationsCancelled => "NotificationsCancelled",
        AppEvent::SettingsReset => "SettingsReset",
    }
}
