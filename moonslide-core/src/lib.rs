//! # Moonslide
//!
//! Game-state and movement loop for Moonslide: drag the moon around to
//! collect stars before more than twenty of them pile up on screen.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      MOONSLIDE CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── vec2.rs     - 2D points                                 │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  └── hash.rs     - Session hashing for replay checks         │
//! │                                                              │
//! │  game/           - Game loop                                 │
//! │  ├── state.rs    - Session and collectibles                  │
//! │  ├── movement.rs - Move commands and interpolation           │
//! │  ├── spawn.rs    - Spawn cadence                             │
//! │  ├── input.rs    - Tap hit testing                           │
//! │  ├── events.rs   - Events for the host                       │
//! │  ├── feedback.rs - Haptics/audio collaborators               │
//! │  ├── controller.rs - GameLoopController                      │
//! │  └── replay.rs   - Scripted replays                          │
//! │                                                              │
//! │  config.rs       - JSON configuration                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate never renders, plays sound or touches a window. Hosts feed it
//! taps and frame deltas and drain [`game::GameEvent`]s back out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use config::{GameConfig, Playfield, ConfigError};
pub use crate::core::vec2::Point;
pub use crate::core::rng::DeterministicRng;
pub use game::controller::{GameLoopController, TickResult};
pub use game::events::GameEvent;
pub use game::state::{Session, SessionPhase, CollectibleId, CollectibleKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed update rate (Hz)
pub const TICK_RATE: u32 = 120;

/// Collectibles allowed on screen; one more ends the session
pub const MAX_COLLECTIBLES: usize = 20;

/// Seconds between collectible spawns
pub const SPAWN_INTERVAL_SECS: f32 = 1.5;
