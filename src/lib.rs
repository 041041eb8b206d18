//! Sky Dodge - a side-scrolling plane game core
//!
//! Core modules:
//! - `sim`: Session simulation (entities, spawning, placement, contacts, game state)
//! - `score`: Persistent score counter with change notification
//! - `persistence`: Integer key-value storage backends
//! - `audio`: Fire-and-forget sound cues
//! - `settings`: Data-driven play-field and timing tuning
//! - `game`: Top-level session controller driven by an external frame clock

pub mod audio;
pub mod game;
pub mod persistence;
pub mod score;
pub mod settings;
pub mod sim;

pub use audio::{AudioCue, AudioSink, LogAudio, SilentAudio};
pub use game::Game;
pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use score::ScoreStore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed frame step used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Points added per collected bonus
    pub const BONUS_INCREMENT: u64 = 5;
    /// Storage key of the score counter
    pub const SCORE_KEY: &str = "score";

    /// Play field defaults (origin at the centre, y up)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Spawned entities start this far beyond the right edge
    pub const SPAWN_MARGIN: f32 = 70.0;
    /// Time for a spawned entity to cross the field, independent of its width
    pub const TRAVERSAL_SECS: f32 = 10.0;

    /// Spawn timer periods (seconds)
    pub const OBSTACLE_PERIOD: f32 = 2.0;
    pub const BONUS_PERIOD: f32 = 6.0;
    /// Floor for configured periods so a bad config can't stall a frame
    pub const MIN_SPAWN_PERIOD: f32 = 0.05;
    /// Maximum catch-up fires per timer per frame
    pub const MAX_FIRES_PER_ADVANCE: u32 = 8;
    /// Longest frame the controller simulates; longer frames are clamped
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Entity extents (full width, height)
    pub const PLAYER_SIZE: (f32, f32) = (56.0, 42.0);
    pub const OBSTACLE_SIZE: (f32, f32) = (120.0, 64.0);
    pub const BONUS_SIZE: (f32, f32) = (32.0, 32.0);
    /// Gap between the player's back edge and the left edge of the field
    pub const PLAYER_INSET: f32 = 10.0;

    /// Background music volume (0.0 - 1.0)
    pub const MUSIC_VOLUME: f32 = 0.1;
}
