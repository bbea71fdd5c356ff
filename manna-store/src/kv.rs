//! Key-value accessor over the `kv` table.
//!
//! Mirrors the AsyncStorage contract the original app was written against:
//! `get`, `set`, `remove`, with JSON helpers for typed records.

use rusqlite::{params, Connection};

use manna_core::error::{MannaError, MannaResult};

/// Key-value store backed by the `kv` table.
pub struct Kv;

impl Kv {
    /// Get a raw string value for a key.
    pub fn get(conn: &Connection, key: &str) -> MannaResult<Option<String>> {
        match conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            [key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(MannaError::Database(e.to_string())),
        }
    }

    /// Set a raw string value for a key (upsert).
    pub fn set(conn: &Connection, key: &str, value: &str) -> MannaResult<()> {
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| MannaError::Database(e.to_string()))?;
        Ok(())
    }

    /// Remove a key. Returns true if the key existed.
    pub fn remove(conn: &Connection, key: &str) -> MannaResult<bool> {
        let changed = conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| MannaError::Database(e.to_string()))?;
        Ok(changed > 0)
    }

    /// Get a JSON-deserialized record.
    pub fn get_json<T: serde::de::DeserializeOwned>(
        conn: &Connection,
        key: &str,
    ) -> MannaResult<Option<T>> {
        match Self::get(conn, key)? {
            Some(v) => {
                let parsed = serde_json::from_str(&v).map_err(|e| {
                    MannaError::Serialization(format!("failed to parse record {key}: {e}"))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a JSON-serialized record.
    pub fn set_json<T: serde::Serialize>(
        conn: &Connection,
        key: &str,
        value: &T,
    ) -> MannaResult<()> {
        let json =
            serde_json::to_string(value).map_err(|e| MannaError::Serialization(e.to_string()))?;
        Self::set(conn, key, &json)
    }
}

/// Fixed storage keys, matching the original app's AsyncStorage keys.
pub mod keys {
    /// Persisted `UserSettings` record.
    pub const USER_SETTINGS: &str = "userSettings";

    /// Sliding window of recently used verse references.
    pub const LAST_USED_VERSES: &str = "lastUsedVerses";

    /// Ids of currently registered notifications.
    pub const SCHEDULED_NOTIFICATION_IDS: &str = "scheduledNotificationIds";
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
    fn test_kv_crud() {
        let conn = setup();

        // Set and get
        Kv::set(&conn, "testKey", "testValue").unwrap();
        assert_eq!(Kv::get(&conn, "testKey").unwrap(), Some("testValue".to_string()));

        // Update (last write wins)
        Kv::set(&conn, "testKey", "updatedValue").unwrap();
        assert_eq!(Kv::get(&conn, "testKey").unwrap(), Some("updatedValue".to_string()));

        // Remove
        assert!(Kv::remove(&conn, "testKey").unwrap());
        assert_eq!(Kv::get(&conn, "testKey").unwrap(), None);
        assert!(!Kv::remove(&conn, "testKey").unwrap());
    }

    #[test]
    fn test_kv_missing_key() {
        let conn = setup();
        assert_eq!(Kv::get(&conn, "nonexistent").unwrap(), None);
        assert_eq!(
            Kv::get_json::<Vec<String>>(&conn, "nonexistent").unwrap(),
            None
        );
    }

    #[test]
    fn test_kv_json_roundtrip() {
        let conn = setup();
        let refs = vec!["John 3:16".to_string(), "Psalm 23:4".to_string()];
        Kv::set_json(&conn, keys::LAST_USED_VERSES, &refs).unwrap();
        let loaded: Vec<String> = Kv::get_json(&conn, keys::LAST_USED_VERSES)
            .unwrap()
            .unwrap();
        assert_eq!(loaded, refs);
    }

    #[test]
    fn test_kv_corrupt_json_is_serialization_error() {
        let conn = setup();
        Kv::set(&conn, "bad", "{not json").unwrap();
        let err = Kv::get_json::<Vec<String>>(&conn, "bad").unwrap_err();
        assert!(err.is_persistence());
    }
}
