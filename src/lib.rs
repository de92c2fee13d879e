//! Gift Grab - A hand-tracked arcade game
//!
//! Core modules:
//! - `gesture`: Landmark samples to a smoothed cursor and a debounced grab intent
//! - `sim`: Simulation (spawning, steering, catches, thefts, combo, difficulty)
//! - `renderer`: Read-only frame drawing onto a 2D surface
//! - `highscores`: High score persistence port
//! - `tuning`: Data-driven game balance

pub mod gesture;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScore, HighScoreStore, MemoryStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Distance (px) at which the hand catches a gift, a thief steals one,
    /// or a thief touches the hand
    pub const CATCH_RADIUS: f32 = 60.0;

    /// Gift defaults
    pub const COLLECTIBLE_SIZE: f32 = 40.0;
    /// Gifts spawn this far above the top edge
    pub const COLLECTIBLE_SPAWN_Y: f32 = -50.0;
    /// Right margin kept free when picking a spawn column
    pub const COLLECTIBLE_SPAWN_MARGIN: f32 = 50.0;
    /// Rotation per 60 Hz frame while falling (radians)
    pub const COLLECTIBLE_SPIN: f32 = 0.02;
    /// Rotation per tick while held
    pub const HELD_SPIN: f32 = 0.1;
    /// Scale a gift pops to when caught
    pub const CATCH_POP_SCALE: f32 = 1.2;
    /// Follow factor for held gifts
    pub const HELD_FOLLOW: f32 = 0.15;

    /// Thief defaults
    pub const ADVERSARY_SIZE: f32 = 70.0;

    /// Visual scale easing factor per tick
    pub const SCALE_EASING: f32 = 0.1;
    /// Scale below which a shrinking actor counts as gone
    pub const VANISH_SCALE: f32 = 0.1;

    /// Scoring
    pub const CATCH_POINTS: u64 = 10;
    pub const COMBO_STEP_POINTS: u64 = 5;
    pub const COMBO_BONUS_CAP: u64 = 50;
    /// Idle time after which the combo streak resets (ms)
    pub const COMBO_TIMEOUT_MS: f64 = 2000.0;

    /// Motion is authored against a 60 fps baseline
    pub const BASELINE_FPS: f32 = 60.0;
    /// Largest frame delta fed to the simulation (ms); guards tab-resume spikes
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
}

/// Exponential approach of `current` toward `target`
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Convert a frame delta in milliseconds into 60 fps frame units
#[inline]
pub fn frame_units(dt_ms: f32) -> f32 {
    dt_ms / 1000.0 * consts::BASELINE_FPS
}
