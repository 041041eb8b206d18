//! Game tuning
//!
//! Loaded from a JSON file; any missing field falls back to its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Play-field and timing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    /// Field width (origin at the centre)
    pub field_width: f32,
    /// Field height (origin at the centre)
    pub field_height: f32,
    /// Horizontal gap beyond the right edge where entities spawn
    pub spawn_margin: f32,

    // === Timing ===
    /// Seconds a spawned entity needs to cross the field
    pub traversal_secs: f32,
    /// Seconds between obstacle spawns
    pub obstacle_period: f32,
    /// Seconds between bonus spawns
    pub bonus_period: f32,

    // === Entity extents ===
    pub player_size: Vec2,
    pub obstacle_size: Vec2,
    pub bonus_size: Vec2,
    /// Gap between the player and the left edge
    pub player_inset: f32,

    // === Audio ===
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spawn_margin: SPAWN_MARGIN,

            traversal_secs: TRAVERSAL_SECS,
            obstacle_period: OBSTACLE_PERIOD,
            bonus_period: BONUS_PERIOD,

            player_size: Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1),
            obstacle_size: Vec2::new(OBSTACLE_SIZE.0, OBSTACLE_SIZE.1),
            bonus_size: Vec2::new(BONUS_SIZE.0, BONUS_SIZE.1),
            player_inset: PLAYER_INSET,

            music_volume: MUSIC_VOLUME,
        }
    }
}

impl Settings {
    /// Where the player starts each session: hugging the left edge, vertically centred
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.player_size.x / 2.0 - self.field_width / 2.0 + self.player_inset,
            0.0,
        )
    }

    /// Replace non-finite values with defaults and clamp values that would
    /// make the simulation degenerate
    pub fn sanitized(self) -> Self {
        let defaults = Settings::default();
        Self {
            field_width: finite_or(self.field_width, defaults.field_width).max(1.0),
            field_height: finite_or(self.field_height, defaults.field_height).max(0.0),
            spawn_margin: finite_or(self.spawn_margin, defaults.spawn_margin),

            traversal_secs: finite_or(self.traversal_secs, defaults.traversal_secs)
                .max(MIN_SPAWN_PERIOD),
            obstacle_period: finite_or(self.obstacle_period, defaults.obstacle_period)
                .max(MIN_SPAWN_PERIOD),
            bonus_period: finite_or(self.bonus_period, defaults.bonus_period)
                .max(MIN_SPAWN_PERIOD),

            player_size: finite_size_or(self.player_size, defaults.player_size),
            obstacle_size: finite_size_or(self.obstacle_size, defaults.obstacle_size),
            bonus_size: finite_size_or(self.bonus_size, defaults.bonus_size),
            player_inset: finite_or(self.player_inset, defaults.player_inset),

            music_volume: finite_or(self.music_volume, defaults.music_volume).clamp(0.0, 1.0),
        }
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring invalid settings {}: {}", path.display(), e),
            },
            Err(e) => log::info!("No settings at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn finite_size_or(value: Vec2, fallback: Vec2) -> Vec2 {
    if value.is_finite() {
        value.max(Vec2::ZERO)
    } else {
        fallback
    }
}
