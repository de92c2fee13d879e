//! Hand tracking input pipeline
//!
//! Turns per-frame hand landmarks from an external perception engine into a
//! smoothed cursor position and a debounced grab intent:
//! - `landmarks`: Keypoint sample types
//! - `filter`: Smoothing and grab debounce
//! - `tracker`: Perception lifecycle, throttling and the cursor handoff

pub mod filter;
pub mod landmarks;
pub mod tracker;

pub use filter::{GestureFilter, GrabDebouncer};
pub use landmarks::{HandLandmarks, Landmark};
pub use tracker::{
    CursorReader, CursorSlot, CursorWriter, HandTracker, PerceptionError, SessionLaunch,
    TrackerStatus,
};

use glam::Vec2;

/// Default cursor smoothing factor
pub const DEFAULT_SMOOTHING: f32 = 0.3;
/// Default fingertip-to-palm offset below which a finger counts as curled
pub const DEFAULT_CURL_THRESHOLD: f32 = 0.15;
/// Consecutive samples needed before a grab/release is reported
pub const GRAB_STABLE_FRAMES: u32 = 3;
/// Minimum spacing between cursor updates (~60 Hz cap)
pub const UPDATE_INTERVAL_MS: f64 = 16.0;

/// Smoothed cursor position (canvas px) and grab intent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    pub pos: Vec2,
    pub grabbing: bool,
}

impl CursorState {
    pub fn new(x: f32, y: f32, grabbing: bool) -> Self {
        Self {
            pos: Vec2::new(x, y),
            grabbing,
        }
    }
}
