//! User preferences record: topic, frequency, setup-completion flag.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use manna_core::error::MannaResult;

use crate::kv::{keys, Kv};

/// The single persisted user-preferences record.
///
/// Last-write-wins, no versioning. Field names match the original JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Verse topic keyword (case-insensitive at lookup time).
    pub topic: String,
    /// Number of notifications per day.
    pub messages_per_day: u32,
    /// Whether initial setup has been completed.
    pub is_setup: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            topic: manna_core::constants::DEFAULT_TOPIC.to_string(),
            messages_per_day: 0,
            is_setup: false,
        }
    }
}

impl UserSettings {
    /// Load the persisted settings, or defaults if none exist.
    pub fn load(conn: &Connection) -> MannaResult<Self> {
        Ok(Kv::get_json(conn, keys::USER_SETTINGS)?.unwrap_or_default())
    }

    /// Persist these settings (last write wins).
    pub fn save(&self, conn: &Connection) -> MannaResult<()> {
        Kv::set_json(conn, keys::USER_SETTINGS, self)
    }

    /// Apply a reset: frequency zeroed and setup flag cleared; the topic is
    /// kept so a later re-setup starts from the previous choice.
    pub fn reset(&mut self) {
        self.messages_per_day = 0;
        self.is_setup = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_load_missing_returns_default() {
        let conn = setup();
        let settings = UserSettings::load(&conn).unwrap();
        assert_eq!(settings, UserSettings::default());
        assert!(!settings.is_setup);
        assert_eq!(settings.messages_per_day, 0);
    }

    #[test]
    fn test_save_and_load() {
        let conn = setup();
        let settings = UserSettings {
            topic: "Peace".into(),
            messages_per_day: 3,
            is_setup: true,
        };
        settings.save(&conn).unwrap();

        let loaded = UserSettings::load(&conn).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_json_field_names_match_original() {
        let settings = UserSettings {
            topic: "hope".into(),
            messages_per_day: 2,
            is_setup: true,
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["topic"], "hope");
        assert_eq!(json["messagesPerDay"], 2);
        assert_eq!(json["isSetup"], true);
    }

    #[test]
    fn test_reset_keeps_topic() {
        let mut settings = UserSettings {
            topic: "comfort".into(),
            messages_per_day: 5,
            is_setup: true,
        };
        settings.reset();
        assert_eq!(settings.topic, "comfort");
        assert_eq!(settings.messages_per_day, 0);
        assert!(!settings.is_setup);
    }
}
