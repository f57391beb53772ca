//! Playback engine contract and an in-memory engine.
//!
//! The queue never decodes audio. It drives whatever implements
//! [`PlaybackEngine`] and listens for [`EngineEvent`]s on a channel handed
//! out by [`PlaybackEngine::subscribe`].

use crossbeam_channel::{Receiver, Sender, unbounded};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::Track;

/// Notifications sent from the engine to its subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A different track became current, for whatever reason
    TrackChanged(Track),
    /// Playback stopped with no current track
    Stopped,
}

/// The engine side of the playback bridge.
pub trait PlaybackEngine {
    /// Start playing a specific track.
    fn play_track(&mut self, track: &Track);

    /// The track the engine currently considers playing.
    fn current_track(&self) -> Option<&Track>;

    /// The engine's own "next" behavior, used when the queue is exhausted.
    fn skip_next(&mut self);

    /// The engine's own "previous" behavior, used when the queue is exhausted.
    fn skip_previous(&mut self);

    /// Register for track-change notifications.
    fn subscribe(&mut self) -> Receiver<EngineEvent>;
}

/// Ordering the engine uses on its own when nobody tells it what to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackOrder {
    #[default]
    Sequential,
    Shuffle,
}

/// Current playback status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
}

/// Engine that "plays" tracks by bookkeeping only.
///
/// Its default skip behavior walks a catalog, either in catalog order or at
/// random.
#[derive(Debug)]
pub struct SimulatedEngine {
    catalog: Vec<Track>,
    current: Option<Track>,
    status: PlaybackStatus,
    fallback: FallbackOrder,
    subscribers: Vec<Sender<EngineEvent>>,
}

impl SimulatedEngine {
    pub fn new(catalog: Vec<Track>, fallback: FallbackOrder) -> Self {
        Self {
            catalog,
            current: None,
            status: PlaybackStatus::Stopped,
            fallback,
            subscribers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn fallback(&self) -> FallbackOrder {
        self.fallback
    }

    /// The current track reached its end: advance the way the engine does
    /// by default.
    pub fn finish_track(&mut self) {
        if self.current.is_none() {
            return;
        }
        debug!("Track finished, auto-advancing");
        self.skip_next();
    }

    /// Stop playback and forget the current track.
    pub fn stop(&mut self) {
        self.current = None;
        self.status = PlaybackStatus::Stopped;
        self.emit(EngineEvent::Stopped);
    }

    fn catalog_position(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.catalog.iter().position(|t| t.id == current.id)
    }

    fn set_current(&mut self, track: Track) {
        info!("Now playing: {}", track.display_title());
        self.current = Some(track.clone());
        self.status = PlaybackStatus::Playing;
        self.emit(EngineEvent::TrackChanged(track));
    }

    fn emit(&mut self, event: EngineEvent) {
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn random_other(&self) -> Option<Track> {
        let candidates: Vec<&Track> = self
            .catalog
            .iter()
            .filter(|t| self.current.as_ref().is_none_or(|c| c.id != t.id))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let mut rng = rand::rng();
        let pick = rng.random_range(0..candidates.len());
        Some(candidates[pick].clone())
    }

    fn step(&mut self, forward: bool) {
        let target = match self.fallback {
            FallbackOrder::Shuffle => self.random_other(),
            FallbackOrder::Sequential => {
                let next = match (self.catalog_position(), forward) {
                    (None, true) => Some(0),
                    (None, false) => None,
                    (Some(pos), true) => Some(pos + 1),
                    (Some(pos), false) => pos.checked_sub(1),
                };
                next.and_then(|i| self.catalog.get(i).cloned())
            }
        };

        match target {
            Some(track) => self.set_current(track),
            None => {
                debug!("Engine reached the end of its catalog");
                self.stop();
            }
        }
    }
}

impl PlaybackEngine for SimulatedEngine {
    fn play_track(&mut self, track: &Track) {
        self.set_current(track.clone());
    }

    fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    fn skip_next(&mut self) {
        self.step(true);
    }

    fn skip_previous(&mut self) {
        self.step(false);
    }

    fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }
}
