//! Game Events
//!
//! Side effects the host has to present. The controller queues them; the
//! host drains the queue once per frame and routes them to its renderer,
//! haptics and audio.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Point;
use crate::game::movement::MoveCommand;
use crate::game::state::{CollectibleId, CollectibleKind};

/// Game event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A collectible appeared
    CollectibleSpawned {
        /// New collectible
        id: CollectibleId,
        /// Its kind
        kind: CollectibleKind,
        /// Where it appeared
        position: Point,
    },

    /// A collectible was picked up
    CollectiblePickedUp {
        /// Removed collectible
        id: CollectibleId,
        /// Its kind
        kind: CollectibleKind,
    },

    /// Score label needs refreshing
    ScoreChanged {
        /// New score
        score: u32,
    },

    /// Actor started moving
    MoveIssued(MoveCommand),

    /// Actor arrived and stopped
    MoveCompleted {
        /// Where the actor stopped
        position: Point,
    },

    /// Tap on empty playfield (light impact)
    TouchFeedback,

    /// Tap landed on the actor itself (success notification)
    Reached,

    /// Too many collectibles; the session is over
    GameOver {
        /// Score when the session ended
        final_score: u32,
    },

    /// A new session started
    SessionReset,
}

impl GameEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::CollectibleSpawned { .. } => "collectible_spawned",
            GameEvent::CollectiblePickedUp { .. } => "collectible_picked_up",
            GameEvent::ScoreChanged { .. } => "score_changed",
            GameEvent::MoveIssued(_) => "move_issued",
            GameEvent::MoveCompleted { .. } => "move_completed",
            GameEvent::TouchFeedback => "touch_feedback",
            GameEvent::Reached => "reached",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::SessionReset => "session_reset",
        }
    }

    /// Whether this event ends or restarts a session.
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. } | GameEvent::SessionReset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_events() {
        assert!(GameEvent::GameOver { final_score: 3 }.is_lifecycle());
        assert!(GameEvent::SessionReset.is_lifecycle());
        assert!(!GameEvent::ScoreChanged { score: 1 }.is_lifecycle());
        assert!(!GameEvent::TouchFeedback.is_lifecycle());
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::CollectiblePickedUp {
            id: CollectibleId(4),
            kind: CollectibleKind::Star2,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("CollectiblePickedUp"));
    }
}
