//! Demo mode: the game plays itself
//!
//! Synthesizes the cursor a tracked hand would produce. Keeps clear of
//! thieves first; when nothing is close it goes after the lowest loose gift
//! and closes the hand once it is in reach.

use glam::Vec2;

use super::state::GameState;
use crate::consts::CATCH_RADIUS;
use crate::frame_units;
use crate::gesture::CursorState;

/// Thieves closer than this (px, center to hand) are avoided
pub const DANGER_RADIUS: f32 = 160.0;
/// Hand closes when a gift is this close
pub const GRAB_RANGE: f32 = CATCH_RADIUS * 0.8;
/// Fastest the synthetic hand moves (px per 60 Hz frame)
pub const MAX_HAND_SPEED: f32 = 14.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    cursor: CursorState,
}

impl Autopilot {
    pub fn new(start: Vec2) -> Self {
        Self {
            cursor: CursorState {
                pos: start,
                grabbing: false,
            },
        }
    }

    /// Start from the middle of the lower half of the canvas
    pub fn for_canvas(canvas: Vec2) -> Self {
        Self::new(Self::rest_point(canvas))
    }

    fn rest_point(canvas: Vec2) -> Vec2 {
        Vec2::new(canvas.x * 0.5, canvas.y * 0.75)
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Pick where to go this frame and move part of the way there
    pub fn steer(&mut self, state: &GameState, dt_ms: f32) -> CursorState {
        let hand = self.cursor.pos;

        let threat = state
            .adversaries
            .iter()
            .map(|a| a.actor.center())
            .filter(|c| c.distance(hand) < DANGER_RADIUS)
            .min_by(|a, b| a.distance(hand).total_cmp(&b.distance(hand)));

        let (target, grabbing) = if let Some(threat) = threat {
            let away = (hand - threat).normalize_or(Vec2::NEG_Y);
            (hand + away * DANGER_RADIUS, false)
        } else if let Some(gift) = state
            .collectibles
            .iter()
            .filter(|c| c.is_loose())
            .map(|c| c.actor.center())
            .max_by(|a, b| a.y.total_cmp(&b.y))
        {
            (gift, gift.distance(hand) < GRAB_RANGE)
        } else {
            (Self::rest_point(state.canvas), false)
        };

        let max_step = MAX_HAND_SPEED * frame_units(dt_ms);
        let step = (target - hand).clamp_length_max(max_step);
        self.cursor = CursorState {
            pos: (hand + step).clamp(Vec2::ZERO, state.canvas),
            grabbing,
        };
        self.cursor
    }
}
