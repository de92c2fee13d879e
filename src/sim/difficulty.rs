//! Score-driven difficulty escalation
//!
//! The tier only ever moves up. Within a tier the gift spawn interval keeps
//! shrinking a little after every spawn, down to a fixed floor.

use crate::tuning::{
    COLLECTIBLE_INTERVAL_DECAY, COLLECTIBLE_INTERVAL_FLOOR_MS, DifficultyTier, TierParams,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyController {
    tier: DifficultyTier,
    params: TierParams,
    collectible_interval_ms: f64,
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::at(DifficultyTier::Low)
    }
}

impl DifficultyController {
    /// Controller sitting at `tier` with its baseline intervals
    pub fn at(tier: DifficultyTier) -> Self {
        let params = tier.params();
        Self {
            tier,
            collectible_interval_ms: params.collectible_interval_ms,
            params,
        }
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn params(&self) -> &TierParams {
        &self.params
    }

    pub fn collectible_interval_ms(&self) -> f64 {
        self.collectible_interval_ms
    }

    pub fn adversary_interval_ms(&self) -> f64 {
        self.params.adversary_interval_ms
    }

    pub fn adversary_speed(&self) -> f32 {
        self.params.adversary_speed
    }

    /// Escalate to the tier `score` calls for. Returns the new tier when it
    /// changed; the spawn parameters switch over in the same call.
    pub fn update(&mut self, score: u64) -> Option<DifficultyTier> {
        let wanted = DifficultyTier::for_score(score);
        if wanted <= self.tier {
            return None;
        }
        *self = Self::at(wanted);
        Some(wanted)
    }

    /// Shrink the gift interval after a spawn. An interval already below the
    /// floor is raised to it.
    pub fn on_collectible_spawned(&mut self) {
        let decayed = self.collectible_interval_ms * COLLECTIBLE_INTERVAL_DECAY;
        self.collectible_interval_ms = decayed.max(COLLECTIBLE_INTERVAL_FLOOR_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_each_threshold_notifies_once() {
        let mut diff = DifficultyController::default();
        let mut notices = Vec::new();
        for score in (0..=400).step_by(5) {
            if let Some(tier) = diff.update(score) {
                notices.push((score, tier));
            }
        }
        assert_eq!(
            notices,
            vec![(100, DifficultyTier::Medium), (200, DifficultyTier::High)]
        );
    }

    #[test]
    fn test_jump_past_medium_lands_on_high() {
        let mut diff = DifficultyController::default();
        assert_eq!(diff.update(250), Some(DifficultyTier::High));
        assert_eq!(diff.update(150), None);
        assert_eq!(diff.tier(), DifficultyTier::High);
    }

    #[test]
    fn test_escalation_resets_interval_to_baseline() {
        let mut diff = DifficultyController::default();
        for _ in 0..10 {
            diff.on_collectible_spawned();
        }
        assert!(diff.collectible_interval_ms() < 1500.0);
        diff.update(100);
        assert_eq!(diff.collectible_interval_ms(), 1200.0);
        assert_eq!(diff.adversary_interval_ms(), 4000.0);
        assert_eq!(diff.adversary_speed(), 4.0);
    }

    #[test]
    fn test_interval_decay_hits_floor() {
        let mut diff = DifficultyController::default();
        diff.on_collectible_spawned();
        assert!((diff.collectible_interval_ms() - 1470.0).abs() < 1e-9);
        for _ in 0..200 {
            diff.on_collectible_spawned();
        }
        assert_eq!(diff.collectible_interval_ms(), 800.0);
    }

    #[test]
    fn test_high_tier_interval_settles_on_shared_floor() {
        let mut diff = DifficultyController::default();
        assert_eq!(diff.update(200), Some(DifficultyTier::High));
        assert_eq!(diff.collectible_interval_ms(), 500.0);
        diff.on_collectible_spawned();
        assert_eq!(diff.collectible_interval_ms(), 800.0);
        for _ in 0..20 {
            diff.on_collectible_spawned();
            assert_eq!(diff.collectible_interval_ms(), 800.0);
        }
    }

    proptest! {
        #[test]
        fn prop_tier_never_decreases(mut scores in proptest::collection::vec(0u64..400, 1..60)) {
            scores.sort_unstable();
            let mut diff = DifficultyController::default();
            let mut last = diff.tier();
            for &score in &scores {
                diff.update(score);
                prop_assert!(diff.tier() >= last);
                last = diff.tier();
            }
            if *scores.last().unwrap() >= 200 {
                prop_assert_eq!(diff.tier(), DifficultyTier::High);
            }
        }

        #[test]
        fn prop_interval_stays_on_or_above_floor(score in 0u64..400, spawns in 1usize..300) {
            let mut diff = DifficultyController::default();
            diff.update(score);
            for _ in 0..spawns {
                diff.on_collectible_spawned();
                prop_assert!(diff.collectible_interval_ms() >= COLLECTIBLE_INTERVAL_FLOOR_MS);
            }
        }

        #[test]
        fn prop_tier_never_drops_on_any_path(scores in proptest::collection::vec(0u64..400, 1..60)) {
            let mut diff = DifficultyController::default();
            let mut last = diff.tier();
            for &score in &scores {
                diff.update(score);
                prop_assert!(diff.tier() >= last);
                last = diff.tier();
            }
        }
    }
}
