//! Test utilities and fixtures for play-queue tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{ids, store_with};
//!
//! let mut queue = store_with(&["a", "b", "c"], Some(1));
//! queue.remove_at(0);
//! assert_eq!(ids(&queue), vec!["b", "c"]);
//! ```

use crate::model::Track;
use crate::player::QueueStore;

/// Creates a track whose id and name are both `id`, with a derived title.
pub fn mock_track(id: &str) -> Track {
    Track::new(id, id)
        .with_title(format!("Track {}", id))
        .with_artist("Test Artist")
}

/// Creates one mock track per id, in order.
pub fn mock_tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| mock_track(id)).collect()
}

/// Builds a queue holding `ids` in order with the cursor at `cursor`.
pub fn store_with(ids: &[&str], cursor: Option<usize>) -> QueueStore {
    let mut queue = QueueStore::new();
    for track in mock_tracks(ids) {
        queue.add(track);
    }
    queue.set_current_index(cursor);
    queue
}

/// The queued ids, in order.
pub fn ids(queue: &QueueStore) -> Vec<String> {
    queue
        .tracks()
        .iter()
        .map(|t| t.id.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_with_sets_cursor() {
        let queue = store_with(&["a", "b"], Some(1));
        assert_eq!(ids(&queue), vec!["a", "b"]);
        assert_eq!(queue.current().unwrap().id.as_str(), "b");
    }

    #[test]
    fn test_mock_track_defaults() {
        let track = mock_track("42");
        assert_eq!(track.id.as_str(), "42");
        assert_eq!(track.display_title(), "Track 42");
        assert_eq!(track.display_artist(), "Test Artist");
    }
}
