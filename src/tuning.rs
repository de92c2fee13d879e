//! Data-driven game balance
//!
//! Difficulty presets, score thresholds and the gift palette. Pure data: the
//! simulation reads these tables, nothing here has behavior beyond lookups.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Difficulty level, escalating with score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum DifficultyTier {
    #[default]
    Low,
    Medium,
    High,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Low => "Low",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::High => "High",
        }
    }

    /// Score at which this tier becomes active
    pub fn threshold(&self) -> u64 {
        match self {
            DifficultyTier::Low => 0,
            DifficultyTier::Medium => MEDIUM_THRESHOLD,
            DifficultyTier::High => HIGH_THRESHOLD,
        }
    }

    /// Highest tier whose threshold `score` has reached
    pub fn for_score(score: u64) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|tier| score >= tier.threshold())
            .unwrap_or_default()
    }

    /// Banner text and color shown when this tier is entered
    pub fn banner(&self) -> (&'static str, &'static str) {
        match self {
            DifficultyTier::Low => ("EASY MODE", "#4CAF50"),
            DifficultyTier::Medium => ("MEDIUM MODE!", "#FFA500"),
            DifficultyTier::High => ("HARD MODE!", "#FF0000"),
        }
    }

    /// Balance parameters for this tier
    pub fn params(&self) -> TierParams {
        match self {
            DifficultyTier::Low => TierParams {
                collectible_interval_ms: 1500.0,
                fall_speed: 2.0..4.0,
                adversary_interval_ms: 5000.0,
                adversary_speed: 3.0,
            },
            DifficultyTier::Medium => TierParams {
                collectible_interval_ms: 1200.0,
                fall_speed: 3.0..5.0,
                adversary_interval_ms: 4000.0,
                adversary_speed: 4.0,
            },
            DifficultyTier::High => TierParams {
                collectible_interval_ms: 500.0,
                fall_speed: 8.0..10.0,
                adversary_interval_ms: 3000.0,
                adversary_speed: 8.0,
            },
        }
    }
}

/// Score needed for Medium
pub const MEDIUM_THRESHOLD: u64 = 100;
/// Score needed for High
pub const HIGH_THRESHOLD: u64 = 200;

/// Per-tier balance parameters. Speeds are pixels per 60 Hz frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    /// Baseline gift spawn interval when the tier is entered
    pub collectible_interval_ms: f64,
    /// Gift fall speed is drawn uniformly from this range
    pub fall_speed: Range<f32>,
    pub adversary_interval_ms: f64,
    pub adversary_speed: f32,
}

/// Multiplier applied to the gift spawn interval after every spawn
pub const COLLECTIBLE_INTERVAL_DECAY: f64 = 0.98;
/// The decaying gift spawn interval never drops below this, in every tier
pub const COLLECTIBLE_INTERVAL_FLOOR_MS: f64 = 800.0;

/// Gift wrapping colors
pub const PALETTE: [&str; 5] = ["#FF4444", "#4CAF50", "#2196F3", "#FFEB3B", "#9C27B0"];

/// Thief body color
pub const ADVERSARY_COLOR: &str = "#2d5a27";
/// Thief glow
pub const ADVERSARY_GLOW: &str = "rgba(45, 90, 39, 0.3)";
/// Tint of a gift once it is held
pub const HELD_COLOR: &str = "#4CAF50";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_score_thresholds() {
        assert_eq!(DifficultyTier::for_score(0), DifficultyTier::Low);
        assert_eq!(DifficultyTier::for_score(99), DifficultyTier::Low);
        assert_eq!(DifficultyTier::for_score(100), DifficultyTier::Medium);
        assert_eq!(DifficultyTier::for_score(199), DifficultyTier::Medium);
        assert_eq!(DifficultyTier::for_score(200), DifficultyTier::High);
        assert_eq!(DifficultyTier::for_score(10_000), DifficultyTier::High);
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(DifficultyTier::Low < DifficultyTier::Medium);
        assert!(DifficultyTier::Medium < DifficultyTier::High);
    }

    #[test]
    fn test_params_are_well_formed() {
        for tier in DifficultyTier::ALL {
            let p = tier.params();
            assert!(p.collectible_interval_ms > 0.0);
            assert!(p.fall_speed.start < p.fall_speed.end);
        }
        // Only High starts below the floor; its first spawn lifts it back up
        let baseline = |tier: DifficultyTier| tier.params().collectible_interval_ms;
        assert!(baseline(DifficultyTier::Low) >= COLLECTIBLE_INTERVAL_FLOOR_MS);
        assert!(baseline(DifficultyTier::Medium) >= COLLECTIBLE_INTERVAL_FLOOR_MS);
        assert!(baseline(DifficultyTier::High) < COLLECTIBLE_INTERVAL_FLOOR_MS);
    }

    #[test]
    fn test_tier_json_roundtrip_name() {
        let json = serde_json::to_string(&DifficultyTier::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
    }
}
