//! A playback session driven by shell commands.

use std::collections::HashSet;
use tracing::warn;

use super::script::{HELP, ShellCommand};
use crate::error::Result;
use crate::library;
use crate::model::{Track, TrackId};
use crate::player::{PlaybackBridge, QueueStore, SimulatedEngine};
use crate::ui::PanelView;

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going, optionally printing a message
    Continue(Option<String>),
    Quit,
}

/// Queue, engine and catalog for one run of the program.
pub struct Session {
    bridge: PlaybackBridge<SimulatedEngine>,
}

impl Session {
    pub fn new(engine: SimulatedEngine, open_panel: bool) -> Self {
        let mut queue = QueueStore::new();
        if open_panel {
            queue.open_panel();
        }
        Self {
            bridge: PlaybackBridge::new(queue, engine),
        }
    }

    pub fn panel(&self) -> PanelView {
        PanelView::from_bridge(&self.bridge)
    }

    pub fn panel_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.panel())?)
    }

    /// Cursor, engine and bridge status, one line.
    pub fn status_line(&self) -> String {
        let engine = self.bridge.engine();
        let cursor = match (self.bridge.queue().current_index(), self.bridge.queue().current()) {
            (Some(i), Some(track)) => format!("#{} {}", i + 1, track.display_title()),
            (Some(i), None) => format!("#{} (past end)", i + 1),
            (None, _) => "none".to_string(),
        };
        format!(
            "cursor: {} | engine: {:?} ({:?} fallback) | bridge: {}",
            cursor,
            engine.status(),
            engine.fallback(),
            self.bridge.state()
        )
    }

    fn catalog_track(&self, id: &TrackId) -> Option<Track> {
        library::find(self.bridge.engine().catalog(), id).cloned()
    }

    /// Run one command, then pick up any engine notifications.
    pub fn execute(&mut self, command: ShellCommand) -> Outcome {
        if command == ShellCommand::Quit {
            return Outcome::Quit;
        }
        let message = self.apply(command);
        self.bridge.process_events();
        Outcome::Continue(message)
    }

    fn apply(&mut self, command: ShellCommand) -> Option<String> {
        match command {
            ShellCommand::Add(ids) => {
                let mut notes = Vec::new();
                for id in ids {
                    match self.catalog_track(&id) {
                        Some(track) => {
                            if !self.bridge.edit_queue(|q| q.add(track)) {
                                notes.push(format!("{} is already queued", id));
                            }
                        }
                        None => notes.push(format!("unknown track id {}", id)),
                    }
                }
                if notes.is_empty() {
                    None
                } else {
                    Some(notes.join("\n"))
                }
            }
            ShellCommand::Remove(index) => {
                self.bridge.edit_queue(|q| q.remove_at(index));
                None
            }
            ShellCommand::Move { from, to } => {
                self.bridge.edit_queue(|q| q.reorder(from, to));
                None
            }
            ShellCommand::Order(ids) => match self.resolve_order(&ids) {
                Ok(tracks) => {
                    self.bridge.edit_queue(|q| q.replace_all(tracks));
                    None
                }
                Err(msg) => Some(msg),
            },
            ShellCommand::Clear => {
                self.bridge.edit_queue(QueueStore::clear);
                None
            }
            ShellCommand::Play(index) => {
                self.bridge.play_from_queue(index);
                None
            }
            ShellCommand::Track(id) => match self.catalog_track(&id) {
                Some(track) => {
                    self.bridge.play_track(&track);
                    None
                }
                None => Some(format!("unknown track id {}", id)),
            },
            ShellCommand::Next => {
                self.bridge.skip_next();
                None
            }
            ShellCommand::Previous => {
                self.bridge.skip_previous();
                None
            }
            ShellCommand::Finish => {
                self.bridge.engine_mut().finish_track();
                None
            }
            ShellCommand::Stop => {
                self.bridge.engine_mut().stop();
                None
            }
            ShellCommand::Peek => {
                let queue = self.bridge.queue();
                let label = |t: Option<&Track>| {
                    t.map_or_else(|| "-".to_string(), |t| t.display_title().to_string())
                };
                Some(format!(
                    "next: {} | previous: {}",
                    label(queue.peek_next()),
                    label(queue.peek_previous())
                ))
            }
            ShellCommand::OpenPanel => {
                self.bridge.queue_mut().open_panel();
                None
            }
            ShellCommand::ClosePanel => {
                self.bridge.queue_mut().close_panel();
                None
            }
            ShellCommand::TogglePanel => {
                self.bridge.queue_mut().toggle_panel();
                None
            }
            ShellCommand::Key(key) => {
                self.bridge.queue_mut().handle_panel_key(key);
                None
            }
            ShellCommand::Show => Some(format!(
                "{}{}",
                self.panel(),
                self.status_line()
            )),
            ShellCommand::Help => Some(HELP.to_string()),
            ShellCommand::Quit => None,
        }
    }

    /// Resolve a full queue order. Ids are looked up in the queue first, then
    /// in the catalog.
    fn resolve_order(&self, ids: &[TrackId]) -> std::result::Result<Vec<Track>, String> {
        let mut seen = HashSet::new();
        let mut tracks = Vec::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id) {
                return Err(format!("{} appears twice in the new order", id));
            }
            let queue = self.bridge.queue();
            let track = queue
                .position_of(id)
                .and_then(|i| queue.get(i).cloned())
                .or_else(|| self.catalog_track(id));
            match track {
                Some(track) => tracks.push(track),
                None => return Err(format!("unknown track id {}", id)),
            }
        }
        if tracks.len() != self.bridge.queue().len() {
            warn!(
                "New order has {} tracks, queue had {}",
                tracks.len(),
                self.bridge.queue().len()
            );
        }
        Ok(tracks)
    }
}
