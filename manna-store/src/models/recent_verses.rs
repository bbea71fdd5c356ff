//! Sliding window of recently used verse references.
//!
//! Bounded FIFO history used as an exclusion set so the same verse is not
//! delivered twice in quick succession. Global across topics, capped at the
//! configured window size, oldest entries evicted first.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use manna_core::error::MannaResult;

use crate::kv::{keys, Kv};

/// Ordered list of up to N most-recent verse references.
///
/// Invariants: length never exceeds the cap it was pushed with; insertion
/// order equals usage order; the last element is the most recently used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentVerses {
    refs: Vec<String>,
}

impl RecentVerses {
    /// Load the persisted window, or an empty one if none exists.
    pub fn load(conn: &Connection) -> MannaResult<Self> {
        Ok(Kv::get_json(conn, keys::LAST_USED_VERSES)?.unwrap_or_default())
    }

    /// Persist the window.
    pub fn save(&self, conn: &Connection) -> MannaResult<()> {
        Kv::set_json(conn, keys::LAST_USED_VERSES, self)
    }

    /// Record a newly used reference, evicting the oldest entries so the
    /// window holds at most `cap` references.
    pub fn push(&mut self, reference: &str, cap: usize) {
        self.refs.push(reference.to_string());
        if self.refs.len() > cap {
            let excess = self.refs.len() - cap;
            self.refs.drain(..excess);
        }
    }

    /// References currently in the window, oldest first.
    pub fn refs(&self) -> &[String] {
        &self.refs
    }

    /// Whether a reference is in the window.
    pub fn contains(&self, reference: &str) -> bool {
        self.refs.iter().any(|r| r == reference)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
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
        let recent = RecentVerses::load(&conn).unwrap();
        assert!(recent.is_empty());
    }

    #[test]
    fn test_push_keeps_usage_order() {
        let mut recent = RecentVerses::default();
        recent.push("John 3:16", 10);
        recent.push("Psalm 23:4", 10);
        assert_eq!(recent.refs(), ["John 3:16", "Psalm 23:4"]);
        assert!(recent.contains("John 3:16"));
        assert!(!recent.contains("Isaiah 26:3"));
    }

    #[test]
    fn test_push_evicts_oldest_beyond_cap() {
        let mut recent = RecentVerses::default();
        for i in 0..15 {
            recent.push(&format!("Ref {i}"), 10);
        }
        assert_eq!(recent.len(), 10);
        // Oldest five evicted, most recent last
        assert_eq!(recent.refs()[0], "Ref 5");
        assert_eq!(recent.refs()[9], "Ref 14");
    }

    #[test]
    fn test_persist_roundtrip() {
        let conn = setup();
        let mut recent = RecentVerses::default();
        recent.push("John 14:27", 10);
        recent.push("Romans 15:13", 10);
        recent.save(&conn).unwrap();

        let loaded = RecentVerses::load(&conn).unwrap();
        assert_eq!(loaded, recent);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        // The original app persisted a bare JSON array of strings.
        let mut recent = RecentVerses::default();
        recent.push("John 3:16", 10);
        let json = serde_json::to_string(&recent).unwrap();
        assert_eq!(json, r#"["John 3:16"]"#);
    }
}
