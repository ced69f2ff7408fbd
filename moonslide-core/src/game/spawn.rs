//! Collectible Spawning
//!
//! The spawn cadence is a countdown advanced by `tick`. It fires once as soon
//! as it is armed, then every `spawn_interval_secs`, until halted.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Point;
use crate::game::state::CollectibleKind;

/// Shortest interval the cadence accepts; smaller values are raised to it.
pub const MIN_SPAWN_INTERVAL_SECS: f32 = 1.0e-3;

/// Fixed-interval spawn timer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnCadence {
    interval_secs: f32,
    until_next_secs: f32,
    running: bool,
}

impl SpawnCadence {
    /// Create an armed cadence whose first spawn is due immediately.
    pub fn new(interval_secs: f32) -> Self {
        Self {
            interval_secs: interval_secs.max(MIN_SPAWN_INTERVAL_SECS),
            until_next_secs: 0.0,
            running: true,
        }
    }

    /// Re-arm: running, first spawn due immediately.
    pub fn restart(&mut self) {
        self.until_next_secs = 0.0;
        self.running = true;
    }

    /// Stop firing until restarted.
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// Whether the cadence is firing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt` seconds and return how many spawns fell due.
    ///
    /// Non-finite or negative steps count as zero. The count saturates at
    /// `u32::MAX`; callers stop consuming it once the session ends.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.until_next_secs -= dt;
        if self.until_next_secs > 0.0 {
            return 0;
        }

        let overdue = -self.until_next_secs;
        let due = (overdue / self.interval_secs).floor() + 1.0;
        self.until_next_secs = self.interval_secs - overdue.rem_euclid(self.interval_secs);
        due as u32
    }
}

/// Random spawn position: anywhere horizontally, upper part of the playfield.
pub fn random_spawn_position(rng: &mut DeterministicRng, config: &GameConfig) -> Point {
    let field = &config.playfield;
    let x = rng.next_range(0.0, field.width);
    let y = rng.next_range(field.height * config.spawn_band_min, field.height);
    Point::new(x, y)
}

/// Uniformly chosen collectible kind.
pub fn random_kind(rng: &mut DeterministicRng) -> CollectibleKind {
    rng.choose(&CollectibleKind::ALL)
        .copied()
        .unwrap_or(CollectibleKind::Star3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_fires_immediately_then_every_interval() {
        let mut cadence = SpawnCadence::new(1.5);
        assert_eq!(cadence.advance(0.0), 1);
        assert_eq!(cadence.advance(1.0), 0);
        assert_eq!(cadence.advance(0.5), 1);
        assert_eq!(cadence.advance(1.4), 0);
        assert_eq!(cadence.advance(0.2), 1);
    }

    #[test]
    fn test_cadence_catches_up_on_long_steps() {
        let mut cadence = SpawnCadence::new(1.5);
        cadence.advance(0.0);
        assert_eq!(cadence.advance(4.5), 3);
    }

    #[test]
    fn test_huge_step_returns_promptly() {
        let mut cadence = SpawnCadence::new(1.5);
        cadence.advance(0.0);
        let due = cadence.advance(1.0e8);
        assert!(due >= 66_000_000);
        // Back on schedule afterwards
        assert_eq!(cadence.advance(0.0), 0);
        assert!(cadence.advance(1.5) <= 1);
    }

    #[test]
    fn test_tiny_interval_is_raised_to_minimum() {
        let mut cadence = SpawnCadence::new(1.0e-10);
        assert_eq!(cadence.advance(0.0), 1);
        let due = cadence.advance(1.0 / 120.0);
        assert!((7..=9).contains(&due), "due = {}", due);

        let mut zero = SpawnCadence::new(0.0);
        assert_eq!(zero.advance(0.0), 1);
        assert!(zero.advance(0.01) <= 11);
    }

    #[test]
    fn test_non_finite_step_is_ignored() {
        let mut cadence = SpawnCadence::new(1.5);
        assert_eq!(cadence.advance(f32::NAN), 1);
        assert_eq!(cadence.advance(f32::INFINITY), 0);
        assert_eq!(cadence.advance(1.5), 1);
    }

    #[test]
    fn test_halted_cadence_is_silent() {
        let mut cadence = SpawnCadence::new(1.5);
        cadence.halt();
        assert_eq!(cadence.advance(10.0), 0);

        cadence.restart();
        assert_eq!(cadence.advance(0.0), 1);
    }

    #[test]
    fn test_spawn_positions_in_band() {
        let config = GameConfig::with_playfield(300.0, 500.0);
        let mut rng = DeterministicRng::new(42);
        for _ in 0..1000 {
            let p = random_spawn_position(&mut rng, &config);
            assert!(p.x >= 0.0 && p.x < 300.0);
            assert!(p.y >= 200.0 && p.y < 500.0);
        }
    }
}
