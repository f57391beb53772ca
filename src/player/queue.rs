//! Play queue management.
//!
//! [`QueueStore`] owns the ordered track list, the current-index cursor and
//! the visibility flag of the queue panel. Every mutation keeps the cursor
//! pointing at the same track where that is possible. Out-of-range input is
//! never an error: it is a no-op, or a `None` result for reads.

use tracing::debug;

use crate::model::{Track, TrackId};

/// Keys the queue panel reacts to while it has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    Escape,
    Other,
}

impl PanelKey {
    /// Map a key name such as `"esc"` or `"Escape"`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "esc" | "escape" => PanelKey::Escape,
            _ => PanelKey::Other,
        }
    }
}

/// The play queue with current position tracking.
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    /// All tracks in playback order, unique by id
    tracks: Vec<Track>,
    /// Cursor into `tracks` (`None` = nothing selected)
    current: Option<usize>,
    /// Whether the queue panel is shown
    panel_open: bool,
}

impl QueueStore {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if queue is empty.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Get queue length.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Get all tracks in the queue.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Get track by index.
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Raw cursor value. May be stale after [`set_current_index`](Self::set_current_index)
    /// or [`replace_all`](Self::replace_all).
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Track under the cursor, if the cursor is in bounds.
    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Position of the track with the given id.
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Append a track unless one with the same id is already queued.
    ///
    /// Returns `true` if the track was added.
    pub fn add(&mut self, track: Track) -> bool {
        if self.position_of(&track.id).is_some() {
            debug!("Track already in queue: {}", track.display_title());
            return false;
        }
        debug!("Adding to queue: {}", track.display_title());
        self.tracks.push(track);
        true
    }

    /// Remove the track at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }
        let track = self.tracks.remove(index);

        if let Some(cur) = self.current {
            if index < cur {
                self.current = Some(cur - 1);
            } else if index == cur {
                // The current track left the queue
                self.current = None;
            }
        }
        if self.tracks.is_empty() {
            self.current = None;
        }

        debug!("Removed from queue: {}", track.display_title());
        Some(track)
    }

    /// Move the track at `from` to `to`, shifting the tracks in between.
    ///
    /// Both indices must be in bounds, otherwise nothing happens. The cursor
    /// follows the track it pointed at.
    pub fn reorder(&mut self, from: usize, to: usize) {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return;
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        if let Some(cur) = self.current {
            if from == cur {
                self.current = Some(to);
            } else if from < cur && cur <= to {
                self.current = Some(cur - 1);
            } else if to <= cur && cur < from {
                self.current = Some(cur + 1);
            }
        }
    }

    /// Replace the whole list, e.g. after a drag gesture settles.
    ///
    /// The cursor is left as-is; keeping it on the intended track is the
    /// caller's job. An empty replacement still clears the cursor.
    pub fn replace_all(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        if self.tracks.is_empty() {
            self.current = None;
        }
    }

    /// Clear the queue.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Set the cursor without bounds checking. Used to follow the engine.
    pub fn set_current_index(&mut self, index: Option<usize>) {
        if let Some(i) = index
            && i >= self.tracks.len()
        {
            debug!("Cursor set past end of queue ({} >= {})", i, self.tracks.len());
        }
        self.current = index;
    }

    /// Select the track at `index` if it exists.
    pub fn play_at(&mut self, index: usize) -> Option<&Track> {
        if index < self.tracks.len() {
            self.current = Some(index);
            self.tracks.get(index)
        } else {
            None
        }
    }

    /// Track after the cursor. With no cursor this is the first track.
    pub fn peek_next(&self) -> Option<&Track> {
        let next = self.current.map_or(0, |i| i + 1);
        self.tracks.get(next)
    }

    /// Track before the cursor.
    pub fn peek_previous(&self) -> Option<&Track> {
        let prev = self.current?.checked_sub(1)?;
        self.tracks.get(prev)
    }

    /// Whether the queue panel is shown.
    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Keyboard handling for the panel: escape closes it.
    pub fn handle_panel_key(&mut self, key: PanelKey) {
        if key == PanelKey::Escape && self.panel_open {
            self.close_panel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ids, mock_track, store_with};

    #[test]
    fn test_queue_basic() {
        let mut queue = QueueStore::new();
        assert!(queue.is_empty());

        queue.add(mock_track("a"));
        queue.add(mock_track("b"));
        queue.add(mock_track("c"));

        assert_eq!(queue.len(), 3);
        assert!(queue.current().is_none());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut queue = store_with(&["a", "b"], None);
        assert!(!queue.add(mock_track("a")));
        assert_eq!(ids(&queue), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_before_current_shifts_cursor() {
        let mut queue = store_with(&["a", "b", "c"], Some(1));
        queue.remove_at(0);
        assert_eq!(ids(&queue), vec!["b", "c"]);
        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(queue.current().unwrap().id.as_str(), "b");
    }

    #[test]
    fn test_remove_current_resets_cursor() {
        let mut queue = store_with(&["a", "b", "c"], Some(1));
        let removed = queue.remove_at(1).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn test_remove_after_current_keeps_cursor() {
        let mut queue = store_with(&["a", "b", "c"], Some(1));
        queue.remove_at(2);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut queue = store_with(&["a", "b"], Some(0));
        assert!(queue.remove_at(2).is_none());
        assert_eq!(ids(&queue), vec!["a", "b"]);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn test_remove_without_cursor() {
        let mut queue = store_with(&["a", "b"], None);
        queue.remove_at(0);
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn test_reorder_moves_current_with_cursor() {
        let mut queue = store_with(&["a", "b", "c"], Some(0));
        queue.reorder(0, 2);
        assert_eq!(ids(&queue), vec!["b", "c", "a"]);
        assert_eq!(queue.current_index(), Some(2));
    }

    #[test]
    fn test_reorder_past_cursor_forward() {
        let mut queue = store_with(&["a", "b", "c", "d"], Some(2));
        queue.reorder(0, 3);
        assert_eq!(ids(&queue), vec!["b", "c", "d", "a"]);
        assert_eq!(queue.current().unwrap().id.as_str(), "c");
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn test_reorder_past_cursor_backward() {
        let mut queue = store_with(&["a", "b", "c", "d"], Some(1));
        queue.reorder(3, 0);
        assert_eq!(ids(&queue), vec!["d", "a", "b", "c"]);
        assert_eq!(queue.current_index(), Some(2));
        assert_eq!(queue.current().unwrap().id.as_str(), "b");
    }

    #[test]
    fn test_reorder_onto_cursor_slot() {
        // Moving an earlier track onto the cursor's slot pushes the cursor back
        let mut queue = store_with(&["a", "b", "c"], Some(1));
        queue.reorder(0, 1);
        assert_eq!(ids(&queue), vec!["b", "a", "c"]);
        assert_eq!(queue.current().unwrap().id.as_str(), "b");
    }

    #[test]
    fn test_reorder_outside_cursor_range() {
        let mut queue = store_with(&["a", "b", "c", "d"], Some(0));
        queue.reorder(2, 3);
        assert_eq!(ids(&queue), vec!["a", "b", "d", "c"]);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut queue = store_with(&["a", "b"], Some(1));
        queue.reorder(0, 2);
        queue.reorder(5, 0);
        assert_eq!(ids(&queue), vec!["a", "b"]);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn test_replace_all_keeps_cursor() {
        let mut queue = store_with(&["a", "b", "c"], Some(0));
        let reordered = vec![mock_track("c"), mock_track("a"), mock_track("b")];
        queue.replace_all(reordered);
        assert_eq!(ids(&queue), vec!["c", "a", "b"]);
        // Cursor is not relocated: it now points at "c"
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn test_replace_all_empty_clears_cursor() {
        let mut queue = store_with(&["a"], Some(0));
        queue.replace_all(Vec::new());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn test_clear() {
        let mut queue = store_with(&["a", "b"], Some(1));
        queue.open_panel();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
        // Panel visibility is independent of contents
        assert!(queue.is_panel_open());
    }

    #[test]
    fn test_empty_queue_navigation() {
        let mut queue = QueueStore::new();
        assert!(queue.peek_next().is_none());
        assert!(queue.peek_previous().is_none());
        assert!(queue.play_at(0).is_none());
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn test_play_at_bounds() {
        let mut queue = store_with(&["a", "b"], None);
        assert_eq!(queue.play_at(1).unwrap().id.as_str(), "b");
        assert_eq!(queue.current_index(), Some(1));
        assert!(queue.play_at(2).is_none());
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn test_peek_neighbours() {
        let queue = store_with(&["a", "b", "c"], Some(1));
        assert_eq!(queue.peek_next().unwrap().id.as_str(), "c");
        assert_eq!(queue.peek_previous().unwrap().id.as_str(), "a");

        let at_end = store_with(&["a", "b", "c"], Some(2));
        assert!(at_end.peek_next().is_none());

        let at_start = store_with(&["a", "b", "c"], Some(0));
        assert!(at_start.peek_previous().is_none());
    }

    #[test]
    fn test_peek_without_cursor_starts_at_front() {
        let queue = store_with(&["a", "b"], None);
        assert_eq!(queue.peek_next().unwrap().id.as_str(), "a");
        assert!(queue.peek_previous().is_none());
    }

    #[test]
    fn test_set_current_index_is_unchecked() {
        let mut queue = store_with(&["a"], None);
        queue.set_current_index(Some(4));
        assert_eq!(queue.current_index(), Some(4));
        assert!(queue.current().is_none());
    }

    #[test]
    fn test_panel_visibility() {
        let mut queue = QueueStore::new();
        assert!(!queue.is_panel_open());
        queue.toggle_panel();
        assert!(queue.is_panel_open());
        queue.toggle_panel();
        assert!(!queue.is_panel_open());
        queue.open_panel();
        queue.open_panel();
        assert!(queue.is_panel_open());
        queue.close_panel();
        assert!(!queue.is_panel_open());
    }

    #[test]
    fn test_escape_closes_panel() {
        let mut queue = QueueStore::new();
        queue.handle_panel_key(PanelKey::Escape);
        assert!(!queue.is_panel_open());

        queue.open_panel();
        queue.handle_panel_key(PanelKey::Other);
        assert!(queue.is_panel_open());
        queue.handle_panel_key(PanelKey::Escape);
        assert!(!queue.is_panel_open());
    }

    #[test]
    fn test_panel_key_names() {
        assert_eq!(PanelKey::from_name("Escape"), PanelKey::Escape);
        assert_eq!(PanelKey::from_name("ESC"), PanelKey::Escape);
        assert_eq!(PanelKey::from_name("q"), PanelKey::Other);
    }
}
