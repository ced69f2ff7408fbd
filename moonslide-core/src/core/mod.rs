//! Core primitives.
//!
//! Geometry, seeded randomness and state hashing shared by the game loop.

pub mod vec2;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec2::Point;
pub use rng::DeterministicRng;
pub use hash::StateHash;
