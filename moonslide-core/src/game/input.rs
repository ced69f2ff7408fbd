//! Tap Hit Testing
//!
//! Resolves a tap position into what it landed on. The result is a tagged
//! [`HitTarget`] that the controller dispatches with a plain `match`.

use serde::{Serialize, Deserialize};
use crate::config::GameConfig;
use crate::core::vec2::Point;
use crate::game::state::{CollectibleId, Session};

/// What a tap landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// A collectible (topmost if several overlap)
    Collectible(CollectibleId),
    /// The on-screen reset button
    ResetButton,
    /// Nothing interactive
    Empty,
}

/// Hit-test a tap against the session and the HUD.
///
/// Collectibles sit above the HUD, so they win over the reset button.
pub fn hit_test(session: &Session, config: &GameConfig, point: Point) -> HitTarget {
    if let Some(id) = session.collectible_at(point, config.collectible_radius) {
        return HitTarget::Collectible(id);
    }
    if config.reset_button.contains(&config.playfield, point) {
        return HitTarget::ResetButton;
    }
    HitTarget::Empty
}

/// A tap scheduled for a given tick (used by scripted replays).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedTap {
    /// Tick on which the tap is delivered (before that tick's update)
    pub tick: u32,
    /// Tap position
    pub point: Point,
}

impl ScriptedTap {
    /// Create a scripted tap.
    pub const fn new(tick: u32, point: Point) -> Self {
        Self { tick, point }
    }
}
