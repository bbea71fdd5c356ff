//! Persisted ids of currently registered notifications.
//!
//! Stored only so a later cancel sweep can be issued; the notification
//! backend also exposes enumeration of pending registrations.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use manna_core::error::MannaResult;

use crate::kv::{keys, Kv};

/// Opaque notification ids returned by the backend at registration time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduledIds {
    ids: Vec<String>,
}

impl ScheduledIds {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// Load the persisted id list, or an empty one if none exists.
    pub fn load(conn: &Connection) -> MannaResult<Self> {
        Ok(Kv::get_json(conn, keys::SCHEDULED_NOTIFICATION_IDS)?.unwrap_or_default())
    }

    /// Persist the id list.
    pub fn save(&self, conn: &Connection) -> MannaResult<()> {
        Kv::set_json(conn, keys::SCHEDULED_NOTIFICATION_IDS, self)
    }

    /// Remove the persisted id list entirely (cancel sweep).
    pub fn clear(conn: &Connection) -> MannaResult<()> {
        Kv::remove(conn, keys::SCHEDULED_NOTIFICATION_IDS)?;
        Ok(())
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
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
    fn test_load_missing_is_empty() {
        let conn = setup();
        assert!(ScheduledIds::load(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_save_load_clear() {
        let conn = setup();
        let ids = ScheduledIds::new(vec!["id-1".into(), "id-2".into()]);
        ids.save(&conn).unwrap();

        let loaded = ScheduledIds::load(&conn).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.ids()[0], "id-1");

        ScheduledIds::clear(&conn).unwrap();
        assert!(ScheduledIds::load(&conn).unwrap().is_empty());
    }
}
