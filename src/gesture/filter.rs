//! Cursor smoothing and grab debounce

use glam::Vec2;

use super::landmarks::HandLandmarks;
use super::{CursorState, DEFAULT_CURL_THRESHOLD, DEFAULT_SMOOTHING, GRAB_STABLE_FRAMES};

/// Run-length debounce for the open/closed hand classification.
///
/// The reported state only flips after `stable_frames` consecutive samples
/// agree on the new classification.
#[derive(Debug, Clone)]
pub struct GrabDebouncer {
    reported: bool,
    last_raw: bool,
    run: u32,
    stable_frames: u32,
}

impl Default for GrabDebouncer {
    fn default() -> Self {
        Self::new(GRAB_STABLE_FRAMES)
    }
}

impl GrabDebouncer {
    pub fn new(stable_frames: u32) -> Self {
        Self {
            reported: false,
            last_raw: false,
            run: 0,
            stable_frames: stable_frames.max(1),
        }
    }

    /// Feed one raw classification, returns the debounced state
    pub fn push(&mut self, curled: bool) -> bool {
        if curled != self.last_raw {
            self.last_raw = curled;
            self.run = 1;
        } else {
            self.run = (self.run + 1).min(self.stable_frames);
        }

        if curled != self.reported && self.run >= self.stable_frames {
            self.reported = curled;
        }
        self.reported
    }

    pub fn is_grabbing(&self) -> bool {
        self.reported
    }

    pub fn reset(&mut self) {
        self.reported = false;
        self.last_raw = false;
        self.run = 0;
    }
}

/// Landmarks in, cursor out
#[derive(Debug, Clone)]
pub struct GestureFilter {
    smoothed: Vec2,
    smoothing: f32,
    curl_threshold: f32,
    grab: GrabDebouncer,
}

impl Default for GestureFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING, DEFAULT_CURL_THRESHOLD)
    }
}

impl GestureFilter {
    pub fn new(smoothing: f32, curl_threshold: f32) -> Self {
        Self {
            smoothed: Vec2::ZERO,
            smoothing: smoothing.clamp(0.0, 1.0),
            curl_threshold,
            grab: GrabDebouncer::default(),
        }
    }

    /// Count fingers whose tip sits within `curl_threshold` of the palm height;
    /// three or more means a closed hand.
    pub fn is_curled(&self, hand: &HandLandmarks) -> bool {
        hand.tip_offsets()
            .iter()
            .filter(|offset| offset.abs() < self.curl_threshold)
            .count()
            >= 3
    }

    /// Process one hand sample against a canvas of `canvas` pixels
    pub fn update(&mut self, hand: &HandLandmarks, canvas: Vec2) -> CursorState {
        let target = hand.index_tip().as_vec2() * canvas;
        self.smoothed += (target - self.smoothed) * self.smoothing;

        let curled = self.is_curled(hand);
        let grabbing = self.grab.push(curled);

        CursorState {
            pos: self.smoothed,
            grabbing,
        }
    }

    /// Last emitted cursor
    pub fn cursor(&self) -> CursorState {
        CursorState {
            pos: self.smoothed,
            grabbing: self.grab.is_grabbing(),
        }
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.smoothed = Vec2::ZERO;
        self.grab.reset();
    }
}
