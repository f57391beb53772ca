//! Bridge state.

use std::fmt;

/// What the playback bridge did last.
///
/// Skips move the bridge into one of the two skip states; every track-change
/// notification from the engine brings it back to [`BridgeState::Synced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgeState {
    /// Nothing has happened yet this session
    #[default]
    Idle,
    /// A skip was served from the queue
    QueueDrivenSkip,
    /// The queue was exhausted and the engine chose the track
    EngineDrivenSkip,
    /// The last engine notification has been applied to the cursor
    Synced,
}

impl fmt::Display for BridgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BridgeState::Idle => "idle",
            BridgeState::QueueDrivenSkip => "queue-driven skip",
            BridgeState::EngineDrivenSkip => "engine-driven skip",
            BridgeState::Synced => "synced",
        };
        f.write_str(label)
    }
}
