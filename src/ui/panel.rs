//! Queue panel view model.
//!
//! Captures what the slide-over queue panel shows, independent of how it is
//! drawn: a header with the track count, a "Now Playing" section, one row per
//! queued track, and either an empty-state message or a footer hint.

use serde::Serialize;
use std::fmt;

use crate::model::Track;
use crate::player::{PlaybackBridge, PlaybackEngine};

pub const EMPTY_TITLE: &str = "Your queue is empty";
pub const EMPTY_HINT: &str = "Add songs to your queue with \"add <id>\"";
pub const FOOTER_HINT: &str = "move to reorder • play to start • remove to drop";

/// The "Now Playing" section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}

impl NowPlaying {
    fn from_track(track: &Track) -> Self {
        Self {
            title: track.display_title().to_string(),
            artist: track.display_artist().to_string(),
            artwork: track.poster_path.clone(),
        }
    }
}

/// A single queued track as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    /// 1-based queue position
    pub position: usize,
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Row is under the queue cursor
    pub is_current: bool,
}

/// Snapshot of the queue panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub open: bool,
    pub count: usize,
    pub now_playing: Option<NowPlaying>,
    pub rows: Vec<PanelRow>,
    /// The clear action is only offered for a non-empty queue
    pub clear_enabled: bool,
}

impl PanelView {
    pub fn from_bridge<E: PlaybackEngine>(bridge: &PlaybackBridge<E>) -> Self {
        let queue = bridge.queue();
        let rows = queue
            .tracks()
            .iter()
            .enumerate()
            .map(|(i, track)| PanelRow {
                position: i + 1,
                id: track.id.as_str().to_string(),
                title: track.display_title().to_string(),
                artist: track.display_artist().to_string(),
                is_current: queue.current_index() == Some(i),
            })
            .collect();

        Self {
            open: queue.is_panel_open(),
            count: queue.len(),
            now_playing: bridge.now_playing().map(NowPlaying::from_track),
            rows,
            clear_enabled: !queue.is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Plain-text rendering of the panel.
impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.open { "open" } else { "closed" };
        writeln!(f, "Queue ({}) [{}]", self.count, state)?;

        if let Some(now) = &self.now_playing {
            writeln!(f, "Now Playing: {} - {}", now.title, now.artist)?;
        }

        if self.is_empty() {
            writeln!(f, "  {}", EMPTY_TITLE)?;
            return writeln!(f, "  {}", EMPTY_HINT);
        }

        for row in &self.rows {
            let marker = if row.is_current { "▶" } else { " " };
            writeln!(
                f,
                "{} #{:<3} {} - {} ({})",
                marker, row.position, row.title, row.artist, row.id
            )?;
        }
        writeln!(f, "{}", FOOTER_HINT)
    }
}
