//! Game Logic Module
//!
//! The game-state and movement update loop.
//!
//! ## Module Structure
//!
//! - `state`: Session, collectibles, phase
//! - `movement`: Move commands and in-flight interpolation
//! - `spawn`: Spawn cadence and random placement
//! - `input`: Tap hit testing
//! - `events`: Events for the presentation host
//! - `feedback`: Haptics/audio collaborator traits
//! - `controller`: The game loop controller
//! - `replay`: Scripted replays

pub mod state;
pub mod movement;
pub mod spawn;
pub mod input;
pub mod events;
pub mod feedback;
pub mod controller;
pub mod replay;

// Re-export key types
pub use state::{Session, SessionPhase, Collectible, CollectibleId, CollectibleKind};
pub use movement::{MoveCommand, ActiveMove};
pub use input::{HitTarget, ScriptedTap};
pub use events::GameEvent;
pub use feedback::{Haptics, Audio, FeedbackError, dispatch_feedback};
pub use controller::{GameLoopController, TickResult};
pub use replay::replay_session;
