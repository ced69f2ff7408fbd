//! Session State Definitions
//!
//! Everything one play-through owns, from `start()` to the next reset.
//! Collectibles live in a BTreeMap so iteration (and hashing) follows spawn order.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::hash::{hash_serialized, StateHash, SESSION_DOMAIN};
use crate::core::vec2::Point;
use crate::game::movement::ActiveMove;

// =============================================================================
// COLLECTIBLE ID
// =============================================================================

/// Opaque collectible identifier, assigned in spawn order within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct CollectibleId(pub u32);

impl fmt::Display for CollectibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// COLLECTIBLE
// =============================================================================

/// Visual variant of a collectible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CollectibleKind {
    /// First star sprite
    Star1 = 0,
    /// Second star sprite
    Star2 = 1,
    /// Third star sprite
    Star3 = 2,
}

impl CollectibleKind {
    /// Every variant, in declaration order.
    pub const ALL: [CollectibleKind; 3] = [
        CollectibleKind::Star1,
        CollectibleKind::Star2,
        CollectibleKind::Star3,
    ];
}

/// A spawned collectible.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Unique ID within the session
    pub id: CollectibleId,
    /// Position on the playfield
    pub position: Point,
    /// Visual variant
    pub kind: CollectibleKind,
}

impl Collectible {
    /// Create a new collectible.
    pub fn new(id: CollectibleId, position: Point, kind: CollectibleKind) -> Self {
        Self { id, position, kind }
    }

    /// Check if a point lies within `radius` of this collectible.
    #[inline]
    pub fn contains(&self, point: Point, radius: f32) -> bool {
        self.position.distance_squared(point) <= radius * radius
    }
}

// =============================================================================
// SESSION PHASE
// =============================================================================

/// Session phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Spawning and moving
    #[default]
    Playing,
    /// Threshold breached; only a reset is accepted
    GameOver,
}

// =============================================================================
// SESSION
// =============================================================================

/// State of one play-through.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Collectibles picked up so far
    pub score: u32,
    /// Current phase
    pub phase: SessionPhase,
    /// Actor position
    pub actor_position: Point,
    /// Collectibles on the playfield (by ID)
    pub collectibles: BTreeMap<CollectibleId, Collectible>,
    /// Move in flight, if any
    pub active_move: Option<ActiveMove>,
    /// Facing multiplier from the last move (-1 or +1)
    pub facing: f32,
    /// Next collectible ID
    next_collectible_id: u32,
}

impl Session {
    /// Create a fresh session with the actor at `actor_position`.
    pub fn new(actor_position: Point) -> Self {
        Self {
            score: 0,
            phase: SessionPhase::Playing,
            actor_position,
            collectibles: BTreeMap::new(),
            active_move: None,
            facing: 1.0,
            next_collectible_id: 0,
        }
    }

    /// Whether the session has ended.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Number of collectibles on the playfield.
    #[inline]
    pub fn collectible_count(&self) -> usize {
        self.collectibles.len()
    }

    /// Insert a new collectible and return its ID.
    pub fn add_collectible(&mut self, position: Point, kind: CollectibleKind) -> CollectibleId {
        let id = CollectibleId(self.next_collectible_id);
        self.next_collectible_id += 1;
        self.collectibles.insert(id, Collectible::new(id, position, kind));
        id
    }

    /// Remove a collectible.
    pub fn remove_collectible(&mut self, id: CollectibleId) -> Option<Collectible> {
        self.collectibles.remove(&id)
    }

    /// Topmost collectible under `point`. The most recently spawned one wins.
    pub fn collectible_at(&self, point: Point, radius: f32) -> Option<CollectibleId> {
        self.collectibles
            .values()
            .rev()
            .find(|c| c.contains(point, radius))
            .map(|c| c.id)
    }

    /// Compute a hash of the session for replay verification.
    pub fn compute_hash(&self) -> Result<StateHash, bincode::Error> {
        hash_serialized(SESSION_DOMAIN, self)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new(Point::new(300.0, 450.0));
        assert_eq!(session.score, 0);
        assert!(!session.is_over());
        assert_eq!(session.collectible_count(), 0);
        assert!(session.active_move.is_none());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut session = Session::new(Point::ZERO);
        let a = session.add_collectible(Point::new(1.0, 1.0), CollectibleKind::Star1);
        let b = session.add_collectible(Point::new(2.0, 2.0), CollectibleKind::Star2);
        session.remove_collectible(a);
        let c = session.add_collectible(Point::new(3.0, 3.0), CollectibleKind::Star3);

        assert!(a < b && b < c);
        assert_eq!(session.collectible_count(), 2);
    }

    #[test]
    fn test_collectible_at_prefers_topmost() {
        let mut session = Session::new(Point::ZERO);
        let _below = session.add_collectible(Point::new(100.0, 100.0), CollectibleKind::Star1);
        let above = session.add_collectible(Point::new(110.0, 100.0), CollectibleKind::Star2);

        assert_eq!(session.collectible_at(Point::new(105.0, 100.0), 24.0), Some(above));
        assert_eq!(session.collectible_at(Point::new(400.0, 400.0), 24.0), None);
    }

    #[test]
    fn test_hash_tracks_state() {
        let mut a = Session::new(Point::new(10.0, 10.0));
        let b = a.clone();
        assert_eq!(a.compute_hash().unwrap(), b.compute_hash().unwrap());

        a.score = 1;
        assert_ne!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
    }
}
