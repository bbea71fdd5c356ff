//! Recency-aware verse selection.
//!
//! Wraps the content table with a persisted sliding window of recently used
//! references so consecutive notifications avoid repeating verses. Selection
//! never fails: if the window cannot be read or written, delivery degrades
//! to random selection and the error is logged.

use rand::Rng;
use tracing::warn;

use manna_store::db::Store;
use manna_store::models::RecentVerses;

use crate::rephrase::{rephrase, RephrasedMessage};
use crate::verses::select_verse_with_fallback;

/// Picks verses for a topic while avoiding the recent-use window.
#[derive(Clone)]
pub struct RecencyTracker {
    store: Store,
    window: usize,
    default_topic: String,
}

impl RecencyTracker {
    pub fn new(store: Store, window: usize, default_topic: &str) -> Self {
        Self {
            store,
            window,
            default_topic: default_topic.to_string(),
        }
    }

    /// Pick a verse for the topic, rephrase it, and record its reference.
    ///
    /// Storage failures are downgraded to warnings: a read failure selects
    /// against an empty window, a write failure skips the recording step.
    pub fn pick_unique<R: Rng>(&self, topic: &str, rng: &mut R) -> RephrasedMessage {
        let mut recent = match self.load_window() {
            Ok(recent) => recent,
            Err(e) => {
                warn!("recency: failed to load recent verses, selecting without history: {e}");
                RecentVerses::default()
            }
        };

        let verse = select_verse_with_fallback(topic, &self.default_topic, recent.refs(), rng);
        let message = rephrase(&verse, rng);

        recent.push(&message.reference, self.window);
        if let Err(e) = self.save_window(&recent) {
            warn!("recency: failed to persist recent verses: {e}");
        }

        message
    }

    /// References currently in the window, oldest first.
    pub fn recent_refs(&self) -> Vec<String> {
        match self.load_window() {
            Ok(recent) => recent.refs().to_vec(),
            Err(e) => {
                warn!("recency: failed to load recent verses: {e}");
                Vec::new()
            }
        }
    }

    fn load_window(&self) -> manna_core::error::MannaResult<RecentVerses> {
        let conn = self.store.conn()?;
        RecentVerses::load(&conn)
    }

    fn save_window(&self, recent: &RecentVerses) -> manna_core::error::MannaResult<()> {
        let conn = self.store.conn()?;
        recent.save(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    use crate::verses::references_for;

    fn test_store() -> (Store, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = manna_core::config::DatabaseConfig::default();
        let store = Store::init(&dir.path().join("test.db"), &config).unwrap();
        (store, dir)
    }

    #[test]
    fn test_no_repeats_within_window() {
        let (store, _dir) = test_store();
        let tracker = RecencyTracker::new(store, 10, "love");
        let mut rng = StdRng::seed_from_u64(11);

        // Four picks from a four-verse topic must all be distinct
        let mut seen = Vec::new();
        for _ in 0..4 {
            let msg = tracker.pick_unique("faith", &mut rng);
            assert!(!seen.contains(&msg.reference), "repeated {}", msg.reference);
            seen.push(msg.reference);
        }
    }

    #[test]
    fn test_window_persists_across_trackers() {
        let (store, _dir) = test_store();
        let mut rng = StdRng::seed_from_u64(5);

        let first = RecencyTracker::new(store.clone(), 10, "love").pick_unique("joy", &mut rng);

        let tracker = RecencyTracker::new(store, 10, "love");
        assert_eq!(tracker.recent_refs(), vec![first.reference.clone()]);
        let second = tracker.pick_unique("joy", &mut rng);
        assert_ne!(second.reference, first.reference);
    }

    #[test]
    fn test_exhausted_topic_still_delivers() {
        let (store, _dir) = test_store();
        let tracker = RecencyTracker::new(store, 10, "love");
        let mut rng = StdRng::seed_from_u64(23);

        let refs = references_for("hope");
        for _ in 0..10 {
            let msg = tracker.pick_unique("hope", &mut rng);
            assert!(refs.contains(&msg.reference));
        }
    }

    #[test]
    fn test_unknown_topic_uses_configured_default() {
        let (store, _dir) = test_store();
        let tracker = RecencyTracker::new(store, 10, "hope");
        let mut rng = StdRng::seed_from_u64(31);

        let hope_refs = references_for("hope");
        for _ in 0..10 {
            let msg = tracker.pick_unique("prosperity", &mut rng);
            assert!(hope_refs.contains(&msg.reference));
        }
    }

    #[test]
    fn test_window_capped() {
        let (store, _dir) = test_store();
        let tracker = RecencyTracker::new(store, 3, "love");
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..8 {
            tracker.pick_unique("comfort", &mut rng);
        }
        assert!(tracker.recent_refs().len() <= 3);
    }

    #[test]
    fn test_storage_failure_degrades_to_random() {
        let (store, _dir) = test_store();
        // Dropping the table forces both the read and write paths to fail.
        store.conn().unwrap().execute("DROP TABLE kv", []).unwrap();

        let tracker = RecencyTracker::new(store, 10, "love");
        let mut rng = StdRng::seed_from_u64(77);
        let msg = tracker.pick_unique("peace", &mut rng);
        assert!(references_for("peace").contains(&msg.reference));
    }
}
