//! Scene components

use bevy::prelude::*;
use moonslide::{CollectibleId, CollectibleKind};

// ============================================================================
// ACTOR
// ============================================================================

/// The moon
#[derive(Component)]
pub struct Actor;

/// Looping frame animation, played while the actor moves
#[derive(Component)]
pub struct ActorAnimation {
    pub timer: Timer,
    pub frame: usize,
}

impl ActorAnimation {
    pub fn new(frame_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(frame_secs, TimerMode::Repeating),
            frame: 0,
        }
    }
}

/// Moon frames (base colour per frame)
pub const MOON_FRAMES: [Color; 4] = [
    Color::srgb(0.98, 0.95, 0.80),
    Color::srgb(0.95, 0.90, 0.70),
    Color::srgb(0.92, 0.86, 0.62),
    Color::srgb(0.95, 0.90, 0.70),
];

/// Crater marking the moon's facing side
#[derive(Component)]
pub struct Crater;

// ============================================================================
// COLLECTIBLES
// ============================================================================

/// Sprite for a collectible in the session
#[derive(Component)]
pub struct CollectibleSprite(pub CollectibleId);

/// Star colour per kind
pub fn kind_color(kind: CollectibleKind) -> Color {
    match kind {
        CollectibleKind::Star1 => Color::srgb(1.0, 0.85, 0.2),   // Gold
        CollectibleKind::Star2 => Color::srgb(0.6, 0.85, 1.0),   // Ice blue
        CollectibleKind::Star3 => Color::srgb(1.0, 0.6, 0.8),    // Rose
    }
}

// ============================================================================
// SCENE
// ============================================================================

/// Cloud layer behind everything
#[derive(Component)]
pub struct CloudLayer;
