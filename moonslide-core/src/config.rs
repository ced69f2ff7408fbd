//! Game Configuration
//!
//! Every tunable of the game loop, loadable from a JSON file.
//! Missing fields fall back to the defaults below.

use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::core::vec2::Point;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`GameConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the game loop cannot run with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },
}

/// Size of the playfield in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Playfield {
    /// Create a playfield of the given size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the playfield.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check whether a point lies inside the playfield.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(600.0, 900.0)
    }
}

/// On-screen reset button, anchored to the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetButtonConfig {
    /// Distance of the button centre from the right edge
    pub right_inset: f32,
    /// Distance of the button centre from the top edge
    pub top_inset: f32,
    /// Hit box width
    pub width: f32,
    /// Hit box height
    pub height: f32,
}

impl Default for ResetButtonConfig {
    fn default() -> Self {
        Self {
            right_inset: 50.0,
            top_inset: 30.0,
            width: 80.0,
            height: 30.0,
        }
    }
}

impl ResetButtonConfig {
    /// Button centre on the given playfield.
    pub fn center(&self, playfield: &Playfield) -> Point {
        Point::new(playfield.width - self.right_inset, playfield.height - self.top_inset)
    }

    /// Check whether a point falls on the button.
    pub fn contains(&self, playfield: &Playfield, point: Point) -> bool {
        let c = self.center(playfield);
        (point.x - c.x).abs() <= self.width / 2.0 && (point.y - c.y).abs() <= self.height / 2.0
    }
}

/// Configuration for the game loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield size
    pub playfield: Playfield,
    /// Collectible count that may be on screen; one more ends the session
    pub max_collectibles: usize,
    /// Seconds between spawns
    pub spawn_interval_secs: f32,
    /// Actor speed is `playfield.width / speed_divisor` units per second
    pub speed_divisor: f32,
    /// Taps closer than this to the actor emit a "reached" signal
    pub reach_epsilon: f32,
    /// Lowest spawn height as a fraction of playfield height
    pub spawn_band_min: f32,
    /// Hit radius of a collectible
    pub collectible_radius: f32,
    /// Reset button placement
    pub reset_button: ResetButtonConfig,
    /// Fixed update rate (Hz)
    pub tick_rate_hz: u32,
    /// Seconds per actor animation frame
    pub actor_frame_secs: f32,
    /// Pickup sound, relative to the asset directory
    pub pickup_sound: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            max_collectibles: crate::MAX_COLLECTIBLES,
            spawn_interval_secs: crate::SPAWN_INTERVAL_SECS,
            speed_divisor: 5.0,
            reach_epsilon: 10.0,
            spawn_band_min: 0.4,
            collectible_radius: 24.0,
            reset_button: ResetButtonConfig::default(),
            tick_rate_hz: crate::TICK_RATE,
            actor_frame_secs: 0.4,
            pickup_sound: "sounds/pickup.ogg".to_string(),
        }
    }
}

impl GameConfig {
    /// Default configuration on a playfield of the given size.
    pub fn with_playfield(width: f32, height: f32) -> Self {
        Self {
            playfield: Playfield::new(width, height),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Like [`GameConfig::load`], but an absent file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Actor speed in units per second.
    pub fn actor_speed(&self) -> f32 {
        self.playfield.width / self.speed_divisor
    }

    /// Seconds per fixed tick.
    pub fn tick_secs(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }

    /// Reject values the game loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !is_positive(self.playfield.width) {
            return invalid("playfield.width", "must be positive");
        }
        if !is_positive(self.playfield.height) {
            return invalid("playfield.height", "must be positive");
        }
        if self.tick_rate_hz == 0 {
            return invalid("tick_rate_hz", "must be positive");
        }
        if !is_positive(self.spawn_interval_secs) {
            return invalid("spawn_interval_secs", "must be positive");
        }
        if self.spawn_interval_secs < self.tick_secs() {
            return invalid("spawn_interval_secs", "must be at least one tick");
        }
        if !is_positive(self.speed_divisor) {
            return invalid("speed_divisor", "must be positive");
        }
        if !(0.0..1.0).contains(&self.spawn_band_min) {
            return invalid("spawn_band_min", "must be in [0, 1)");
        }
        if self.reach_epsilon < 0.0 {
            return invalid("reach_epsilon", "must not be negative");
        }
        if self.collectible_radius < 0.0 {
            return invalid("collectible_radius", "must not be negative");
        }
        if !is_positive(self.actor_frame_secs) {
            return invalid("actor_frame_secs", "must be positive");
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
