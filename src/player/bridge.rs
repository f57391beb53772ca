//! Queue-aware playback control.
//!
//! [`PlaybackBridge`] owns the [`QueueStore`] and a [`PlaybackEngine`].
//! Skips prefer the queue's neighbours over the engine's own ordering. The
//! cursor is moved onto the playing track whenever either side changes: on
//! every track change the engine reports, and after every queue edit made
//! through [`PlaybackBridge::edit_queue`].

use crossbeam_channel::Receiver;
use std::fmt;
use tracing::{debug, info};

use super::engine::{EngineEvent, PlaybackEngine};
use super::queue::QueueStore;
use super::state::BridgeState;
use crate::model::{Track, TrackId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => f.write_str("next"),
            Direction::Previous => f.write_str("previous"),
        }
    }
}

/// Composes the play queue with a playback engine.
pub struct PlaybackBridge<E: PlaybackEngine> {
    queue: QueueStore,
    engine: E,
    /// Subscription made once, at construction
    events: Receiver<EngineEvent>,
    state: BridgeState,
}

impl<E: PlaybackEngine> PlaybackBridge<E> {
    /// Wire a queue to an engine and subscribe to its notifications.
    pub fn new(queue: QueueStore, mut engine: E) -> Self {
        let events = engine.subscribe();
        Self {
            queue,
            engine,
            events,
            state: BridgeState::Idle,
        }
    }

    /// Get a reference to the play queue.
    pub fn queue(&self) -> &QueueStore {
        &self.queue
    }

    /// Get a mutable reference to the play queue.
    ///
    /// No re-sync happens afterwards; content changes go through
    /// [`edit_queue`](Self::edit_queue).
    pub fn queue_mut(&mut self) -> &mut QueueStore {
        &mut self.queue
    }

    /// Change the queue's contents, then put the cursor back on the track the
    /// engine is playing if that track is queued.
    pub fn edit_queue<R>(&mut self, edit: impl FnOnce(&mut QueueStore) -> R) -> R {
        let result = edit(&mut self.queue);
        self.sync_to_now_playing();
        result
    }

    /// Point the cursor at the engine's current track if it is queued.
    ///
    /// Nothing playing, or playing something unqueued, leaves the cursor alone.
    pub fn sync_to_now_playing(&mut self) {
        let Some(id) = self.engine.current_track().map(|t| t.id.clone()) else {
            return;
        };
        if let Some(index) = self.queue.position_of(&id)
            && self.queue.current_index() != Some(index)
        {
            debug!("Queue changed, cursor moved to now playing {} ({})", index, id);
            self.queue.set_current_index(Some(index));
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access for engine-side actions (end of track, stop).
    ///
    /// Call [`process_events`](Self::process_events) afterwards.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// The track the engine reports as playing.
    pub fn now_playing(&self) -> Option<&Track> {
        self.engine.current_track()
    }

    /// Play the queue's next track, or let the engine pick one.
    pub fn skip_next(&mut self) {
        self.skip(Direction::Next);
    }

    /// Play the queue's previous track, or let the engine pick one.
    pub fn skip_previous(&mut self) {
        self.skip(Direction::Previous);
    }

    /// Click-to-play from the queue panel.
    pub fn play_from_queue(&mut self, index: usize) {
        let Some(track) = self.queue.play_at(index).cloned() else {
            return;
        };
        self.engine.play_track(&track);
        self.process_events();
    }

    /// Play a track directly, whether or not it is queued.
    pub fn play_track(&mut self, track: &Track) {
        self.engine.play_track(track);
        self.process_events();
    }

    /// Apply every pending engine notification. Returns how many were handled.
    ///
    /// The host calls this once per event-loop turn so that changes the
    /// engine makes on its own are reflected in the cursor.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            handled += 1;
            match event {
                EngineEvent::TrackChanged(track) => self.sync_to(&track.id),
                EngineEvent::Stopped => debug!("Engine stopped"),
            }
        }
        handled
    }

    fn skip(&mut self, direction: Direction) {
        let peeked = match direction {
            Direction::Next => self.queue.peek_next(),
            Direction::Previous => self.queue.peek_previous(),
        }
        .cloned();

        match peeked {
            Some(track) => {
                info!(
                    "Playing {} track from queue: {}",
                    direction,
                    track.display_title()
                );
                self.state = BridgeState::QueueDrivenSkip;
                self.engine.play_track(&track);
                self.process_events();
                // The engine decides what actually plays; follow it by id
                if let Some(id) = self.engine.current_track().map(|t| t.id.clone()) {
                    self.sync_to(&id);
                }
            }
            None => {
                info!("No {} track in queue", direction);
                self.state = BridgeState::EngineDrivenSkip;
                match direction {
                    Direction::Next => self.engine.skip_next(),
                    Direction::Previous => self.engine.skip_previous(),
                }
                self.process_events();
            }
        }
    }

    fn sync_to(&mut self, id: &TrackId) {
        if let Some(index) = self.queue.position_of(id) {
            debug!("Queue cursor synced to {} ({})", index, id);
            self.queue.set_current_index(Some(index));
        } else {
            debug!("Now playing {} is not queued, cursor unchanged", id);
        }
        self.state = BridgeState::Synced;
    }
}
