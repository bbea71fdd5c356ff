//! Settings service: load, save, and reset user preferences.
//!
//! Thin service over the persisted `UserSettings` record. Saving marks setup
//! complete; resetting zeroes the frequency and clears the setup flag while
//! keeping the chosen topic.

use tracing::info;

use manna_core::error::MannaResult;
use manna_store::db::Store;
use manna_store::models::UserSettings;

use crate::event_bus::{AppEvent, EventBus};
use crate::service::{Service, ServiceState};

pub struct SettingsService {
    state: ServiceState,
    store: Store,
    event_bus: EventBus,
}

impl SettingsService {
    pub fn new(store: Store, event_bus: EventBus) -> Self {
        Self {
            state: ServiceState::Created,
            store,
            event_bus,
        }
    }

    /// Current settings, or defaults when nothing has been saved yet.
    pub fn load(&self) -> MannaResult<UserSettings> {
        let conn = self.store.conn()?;
        UserSettings::load(&conn)
    }

    /// Persist a topic and daily frequency, marking setup complete.
    pub fn save(&self, topic: &str, messages_per_day: u32) -> MannaResult<UserSettings> {
        let settings = UserSettings {
            topic: topic.to_string(),
            messages_per_day,
            is_setup: true,
        };
        let conn = self.store.conn()?;
        settings.save(&conn)?;

        info!("settings saved: topic={topic}, messages_per_day={messages_per_day}");
        self.event_bus.emit(AppEvent::SetupCompleted {
            topic: topic.to_string(),
            messages_per_day,
        });
        Ok(settings)
    }

    /// Reset preferences: zero the frequency and clear the setup flag.
    /// The topic is kept so a later re-setup starts from the previous choice.
    ///
    /// Load and write-back run in one transaction so the record is never
    /// observed half-reset.
    pub fn reset(&self) -> MannaResult<UserSettings> {
        let settings = self.store.transaction(|conn| {
            let mut settings = UserSettings::load(conn)?;
            settings.reset();
            settings.save(conn)?;
            Ok(settings)
        })?;

        info!("settings reset");
        self.event_bus.emit(AppEvent::SettingsReset);
        Ok(settings)
    }
}

impl Service for SettingsService {
    fn name(&self) -> &str {
        "settings"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> MannaResult<()> {
        // Touch the record once so a corrupt store surfaces at startup.
        self.load()?;
        self.state = ServiceState::Running;
        info!("settings service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> MannaResult<()> {
        self.state = ServiceState::Stopped;
        Ok(())
    }
}
