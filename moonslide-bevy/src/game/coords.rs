//! Playfield <-> world coordinates
//!
//! The playfield has its origin at the bottom-left corner; the camera is
//! centred on the playfield, so world origin is the playfield centre.

use bevy::prelude::*;
use moonslide::{Playfield, Point};

/// Playfield point to world position.
pub fn to_world(field: &Playfield, point: Point) -> Vec2 {
    Vec2::new(point.x - field.width / 2.0, point.y - field.height / 2.0)
}

/// World position to playfield point.
pub fn to_playfield(field: &Playfield, world: Vec2) -> Point {
    Point::new(world.x + field.width / 2.0, world.y + field.height / 2.0)
}
