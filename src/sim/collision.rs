//! Proximity checks
//!
//! Every interaction in the game (catch, theft, thief touching the hand) is
//! the same test: two centers closer than `CATCH_RADIUS`.

use glam::Vec2;

use super::state::{Adversary, Collectible, CollectibleId};
use crate::consts::CATCH_RADIUS;

/// Whether two points are within catch range
#[inline]
pub fn within_reach(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < CATCH_RADIUS
}

/// First thief whose center is within reach of the hand
pub fn adversary_touching(adversaries: &[Adversary], hand: Vec2) -> Option<&Adversary> {
    adversaries
        .iter()
        .find(|a| within_reach(a.actor.center(), hand))
}

/// Nearest loose gift to `from`; ties go to the earlier gift
pub fn nearest_loose(collectibles: &[Collectible], from: Vec2) -> Option<CollectibleId> {
    let mut best: Option<(CollectibleId, f32)> = None;
    for c in collectibles.iter().filter(|c| c.is_loose()) {
        let d = c.actor.center().distance(from);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((c.id, d));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ADVERSARY_SIZE, COLLECTIBLE_SIZE};
    use crate::sim::state::{Actor, EntrySide};

    fn gift(id: u32, center: Vec2) -> Collectible {
        let mut actor = Actor::new(Vec2::ZERO, 2.0, COLLECTIBLE_SIZE, 0.0);
        actor.set_center(center);
        Collectible::new(CollectibleId(id), actor, "#FF4444")
    }

    #[test]
    fn test_within_reach_is_strict() {
        assert!(within_reach(Vec2::ZERO, Vec2::new(59.9, 0.0)));
        assert!(!within_reach(Vec2::ZERO, Vec2::new(60.0, 0.0)));
    }

    #[test]
    fn test_nearest_skips_claimed() {
        let mut near = gift(1, Vec2::new(10.0, 0.0));
        near.mark_caught();
        let far = gift(2, Vec2::new(100.0, 0.0));
        let mut stolen = gift(3, Vec2::new(5.0, 0.0));
        stolen.mark_stolen();
        let gifts = vec![near, far, stolen];
        assert_eq!(nearest_loose(&gifts, Vec2::ZERO), Some(CollectibleId(2)));
    }

    #[test]
    fn test_nearest_tie_goes_to_first() {
        let gifts = vec![
            gift(1, Vec2::new(-50.0, 0.0)),
            gift(2, Vec2::new(50.0, 0.0)),
        ];
        assert_eq!(nearest_loose(&gifts, Vec2::ZERO), Some(CollectibleId(1)));
        assert_eq!(nearest_loose(&[], Vec2::ZERO), None);
    }

    #[test]
    fn test_adversary_touching_uses_center() {
        let mut actor = Actor::new(Vec2::ZERO, 3.0, ADVERSARY_SIZE, 0.0);
        actor.set_center(Vec2::new(200.0, 200.0));
        let thieves = vec![Adversary::new(9, actor, EntrySide::Left)];
        assert!(adversary_touching(&thieves, Vec2::new(230.0, 200.0)).is_some());
        assert!(adversary_touching(&thieves, Vec2::new(300.0, 200.0)).is_none());
    }
}
