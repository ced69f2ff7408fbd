//! Actor Movement
//!
//! A tap produces a [`MoveCommand`]; the session keeps the in-flight part as
//! an [`ActiveMove`] that `tick` advances until the deadline passes.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Point;

/// A move toward a tapped point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Where the actor is heading
    pub target: Point,
    /// Seconds until arrival
    pub duration_secs: f32,
    /// Horizontal mirroring of the actor sprite: -1 heading right (or straight
    /// up/down), +1 heading left
    pub direction_sign: f32,
}

impl MoveCommand {
    /// Derive a move from the actor position at `speed` units per second.
    ///
    /// ```
    /// use moonslide::core::Point;
    /// use moonslide::game::movement::MoveCommand;
    ///
    /// // width 300 => speed 60/s; 60 units away => 1 second
    /// let cmd = MoveCommand::new(Point::ZERO, Point::new(60.0, 0.0), 300.0 / 5.0);
    /// assert_eq!(cmd.duration_secs, 1.0);
    /// assert_eq!(cmd.direction_sign, -1.0);
    /// ```
    pub fn new(from: Point, target: Point, speed: f32) -> Self {
        let distance = from.distance(target);
        let duration_secs = if speed > 0.0 { distance / speed } else { 0.0 };
        let direction_sign = if target.x >= from.x { -1.0 } else { 1.0 };

        Self {
            target,
            duration_secs,
            direction_sign,
        }
    }
}

/// Interpolation state of the move in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveMove {
    /// Where the move started
    pub from: Point,
    /// Where the move ends
    pub target: Point,
    /// Total duration
    pub duration_secs: f32,
    /// Time spent so far
    pub elapsed_secs: f32,
}

/// Outcome of advancing a move by one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveStep {
    /// Still travelling
    InFlight(Point),
    /// Arrived at the target this step
    Arrived(Point),
}

impl ActiveMove {
    /// Start a move from `from` along `command`.
    pub fn start(from: Point, command: &MoveCommand) -> Self {
        Self {
            from,
            target: command.target,
            duration_secs: command.duration_secs,
            elapsed_secs: 0.0,
        }
    }

    /// Fraction of the move completed, in [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed_secs / self.duration_secs).min(1.0)
    }

    /// Advance by `dt` seconds and report the new actor position.
    pub fn advance(&mut self, dt: f32) -> MoveStep {
        self.elapsed_secs += dt.max(0.0);
        let t = self.progress();
        if t >= 1.0 {
            MoveStep::Arrived(self.target)
        } else {
            MoveStep::InFlight(self.from.lerp(self.target, t))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_from_distance_and_speed() {
        let cmd = MoveCommand::new(Point::ZERO, Point::new(60.0, 0.0), 60.0);
        assert_eq!(cmd.duration_secs, 1.0);

        // 3-4-5 triangle scaled by 30 => 150 units at 60/s
        let cmd = MoveCommand::new(Point::ZERO, Point::new(90.0, 120.0), 60.0);
        assert!((cmd.duration_secs - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_direction_sign() {
        let from = Point::new(100.0, 100.0);
        assert_eq!(MoveCommand::new(from, Point::new(150.0, 0.0), 60.0).direction_sign, -1.0);
        assert_eq!(MoveCommand::new(from, Point::new(50.0, 0.0), 60.0).direction_sign, 1.0);
        // Straight up counts as "right"
        assert_eq!(MoveCommand::new(from, Point::new(100.0, 300.0), 60.0).direction_sign, -1.0);
    }

    #[test]
    fn test_zero_distance_move() {
        let cmd = MoveCommand::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 60.0);
        assert_eq!(cmd.duration_secs, 0.0);

        let mut active = ActiveMove::start(Point::new(5.0, 5.0), &cmd);
        assert_eq!(active.advance(0.0), MoveStep::Arrived(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_advance_interpolates_then_arrives() {
        let cmd = MoveCommand::new(Point::ZERO, Point::new(60.0, 0.0), 60.0);
        let mut active = ActiveMove::start(Point::ZERO, &cmd);

        assert_eq!(active.advance(0.25), MoveStep::InFlight(Point::new(15.0, 0.0)));
        assert_eq!(active.advance(0.25), MoveStep::InFlight(Point::new(30.0, 0.0)));
        assert_eq!(active.progress(), 0.5);
        assert_eq!(active.advance(0.75), MoveStep::Arrived(Point::new(60.0, 0.0)));
    }
}
