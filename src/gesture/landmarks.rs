//! Hand landmark samples
//!
//! Points are normalized image coordinates in [0, 1] x [0, 1] with y growing
//! downward, in the 21-point hand layout used by common hand trackers.

use glam::Vec2;

/// Number of keypoints in a hand sample
pub const LANDMARK_COUNT: usize = 21;

/// Keypoint indices
pub const PALM: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// The five fingertips, thumb first
pub const FINGER_TIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// A single normalized keypoint
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from `[x0, y0, x1, y1, ...]`. Extra trailing points are ignored;
    /// fewer than 21 points (or non-finite values) yield `None`.
    pub fn from_flat(coords: &[f32]) -> Option<Self> {
        if coords.len() < LANDMARK_COUNT * 2 {
            return None;
        }
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (point, xy) in points.iter_mut().zip(coords.chunks_exact(2)) {
            if !xy[0].is_finite() || !xy[1].is_finite() {
                return None;
            }
            *point = Landmark::new(xy[0], xy[1]);
        }
        Some(Self { points })
    }

    /// Split a flat buffer holding `hand_count` consecutive hands
    pub fn split_flat(coords: &[f32], hand_count: usize) -> Vec<Self> {
        coords
            .chunks_exact(LANDMARK_COUNT * 2)
            .take(hand_count)
            .filter_map(Self::from_flat)
            .collect()
    }

    pub fn point(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn palm(&self) -> Landmark {
        self.points[PALM]
    }

    pub fn index_tip(&self) -> Landmark {
        self.points[INDEX_TIP]
    }

    /// Vertical offset of each fingertip from the palm reference, thumb first
    pub fn tip_offsets(&self) -> [f32; 5] {
        let palm_y = self.palm().y;
        FINGER_TIPS.map(|i| self.points[i].y - palm_y)
    }
}
