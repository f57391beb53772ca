//! Play queue and queue-aware playback control.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Front end (shell, script, UI)                  │
//! │     add / remove / move / order / clear / play / next / prev    │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ method calls
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        PlaybackBridge                           │
//! │   QueueStore (tracks, cursor, panel)  +  skip/sync policy       │
//! └──────────────┬──────────────────────────────────▲───────────────┘
//!                │ PlaybackEngine calls             │ crossbeam channel
//!                ▼                                  │ (EngineEvent)
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Playback engine                          │
//! │          plays tracks, owns "now playing", default skips        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod bridge;
mod engine;
mod queue;
mod state;

pub use bridge::PlaybackBridge;
pub use engine::{EngineEvent, FallbackOrder, PlaybackEngine, PlaybackStatus, SimulatedEngine};
pub use queue::{PanelKey, QueueStore};
pub use state::BridgeState;
