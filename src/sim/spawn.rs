//! Spawning gifts and thieves
//!
//! Both populations spawn on their own interval timers. All positions are
//! computed from the live canvas size.

use glam::Vec2;
use rand::Rng;

use super::state::{Actor, Adversary, Collectible, CollectibleId, EntrySide, GameState};
use crate::consts::*;
use crate::tuning::PALETTE;

/// Session time of the most recent spawn of each kind (`None` = spawn on the
/// next active tick)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnTimers {
    pub collectible: Option<f64>,
    pub adversary: Option<f64>,
}

impl SpawnTimers {
    fn due(last: Option<f64>, now_ms: f64, interval_ms: f64) -> bool {
        match last {
            Some(last) => now_ms - last > interval_ms,
            None => true,
        }
    }
}

/// Uniform sample in `[0, max)`, or 0 when the span is empty
fn random_upto(rng: &mut impl Rng, max: f32) -> f32 {
    if max > 0.0 { rng.random_range(0.0..max) } else { 0.0 }
}

/// Spawn whatever is due this tick
pub fn spawn_due(state: &mut GameState) {
    let now = state.time_ms;

    if SpawnTimers::due(
        state.spawn_timers.collectible,
        now,
        state.difficulty.collectible_interval_ms(),
    ) {
        spawn_collectible(state);
        state.spawn_timers.collectible = Some(now);
        state.difficulty.on_collectible_spawned();
    }

    if SpawnTimers::due(
        state.spawn_timers.adversary,
        now,
        state.difficulty.adversary_interval_ms(),
    ) {
        let side = if state.rng.random_bool(0.5) {
            EntrySide::Left
        } else {
            EntrySide::Right
        };
        spawn_adversary(state, side);
        state.spawn_timers.adversary = Some(now);
    }
}

/// Drop a new gift in above a random column
pub fn spawn_collectible(state: &mut GameState) -> CollectibleId {
    let x = random_upto(&mut state.rng, state.canvas.x - COLLECTIBLE_SPAWN_MARGIN);
    let range = state.difficulty.params().fall_speed.clone();
    let speed = state.rng.random_range(range);
    let rotation = state.rng.random_range(0.0..std::f32::consts::TAU);
    let color = PALETTE[state.rng.random_range(0..PALETTE.len())];
    spawn_collectible_at(state, Vec2::new(x, COLLECTIBLE_SPAWN_Y), speed, rotation, color)
}

/// Place a gift with explicit parameters
pub fn spawn_collectible_at(
    state: &mut GameState,
    pos: Vec2,
    speed: f32,
    rotation: f32,
    color: &'static str,
) -> CollectibleId {
    let id = CollectibleId(state.next_entity_id());
    let actor = Actor::new(pos, speed, COLLECTIBLE_SIZE, rotation);
    state.collectibles.push(Collectible::new(id, actor, color));
    log::debug!("Spawned gift {:?} at x={:.0} speed={:.2}", id, pos.x, speed);
    id
}

/// Send in a thief from `side` at a random height
pub fn spawn_adversary(state: &mut GameState, side: EntrySide) -> u32 {
    let y = random_upto(&mut state.rng, state.canvas.y - ADVERSARY_SIZE);
    spawn_adversary_at(state, side, y)
}

/// Send in a thief from `side` at height `y`
pub fn spawn_adversary_at(state: &mut GameState, side: EntrySide, y: f32) -> u32 {
    let x = match side {
        EntrySide::Left => -ADVERSARY_SIZE,
        EntrySide::Right => state.canvas.x,
    };
    let speed = state.difficulty.adversary_speed() * side.sign();
    let id = state.next_entity_id();
    let actor = Actor::new(Vec2::new(x, y), speed, ADVERSARY_SIZE, 0.0);
    state.adversaries.push(Adversary::new(id, actor, side));
    log::debug!("Spawned thief {} from {:?} at y={:.0}", id, side, y);
    id
}
