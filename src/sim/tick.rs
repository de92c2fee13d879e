//! Per-frame simulation step
//!
//! One call advances both populations by the elapsed frame time. Order within
//! a tick: hand/thief contact, spawning, combo timeout, gifts (fall, catch,
//! follow), thieves (target, pursue, steal), removals, hand/thief contact
//! again. Removals run after every movement and interaction so a tick never
//! leaves half-updated collections behind.

use super::collision::{adversary_touching, nearest_loose, within_reach};
use super::spawn::spawn_due;
use super::state::{CollectibleId, GameEvent, GameState};
use crate::consts::*;
use crate::frame_units;
use crate::gesture::CursorState;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest cursor published by the gesture pipeline
    pub cursor: CursorState,
}

impl TickInput {
    pub fn new(cursor: CursorState) -> Self {
        Self { cursor }
    }
}

/// What a tick resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session not active, nothing moved
    Inactive,
    Continue,
    /// A thief touched the hand
    PlayerCaught,
}

/// Advance an active session by `dt_ms`: difficulty first, then the populations
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> TickOutcome {
    if !state.is_active() {
        return TickOutcome::Inactive;
    }
    update_difficulty(state);
    advance(state, input, dt_ms)
}

/// Apply any tier escalation the current score calls for
pub fn update_difficulty(state: &mut GameState) {
    if let Some(tier) = state.difficulty.update(state.score) {
        log::info!("Difficulty escalated to {} at score {}", tier.as_str(), state.score);
        state.emit(GameEvent::TierChanged(tier));
        let (text, color) = tier.banner();
        state.message(text, color);
    }
}

/// Spawn, move, resolve and retire both populations
pub fn advance(state: &mut GameState, input: &TickInput, dt_ms: f32) -> TickOutcome {
    let cursor = input.cursor;

    // Contact ends the run before anything else moves
    if adversary_touching(&state.adversaries, cursor.pos).is_some() {
        return TickOutcome::PlayerCaught;
    }

    let dt_ms = dt_ms.max(0.0);
    state.time_ms += dt_ms as f64;

    spawn_due(state);

    if state.combo.expire(state.time_ms) {
        state.emit(GameEvent::ComboChanged(0));
    }

    update_collectibles(state, &cursor, dt_ms);
    update_adversaries(state, dt_ms);
    retire(state);

    if adversary_touching(&state.adversaries, cursor.pos).is_some() {
        return TickOutcome::PlayerCaught;
    }
    TickOutcome::Continue
}

fn update_collectibles(state: &mut GameState, cursor: &CursorState, dt_ms: f32) {
    let frames = frame_units(dt_ms);
    let bottom = state.canvas.y;
    let mut catches = 0;

    for gift in state.collectibles.iter_mut() {
        gift.actor.ease_scale();

        if gift.is_loose() {
            gift.actor.pos.y += gift.actor.speed * frames;
            gift.actor.rotation += COLLECTIBLE_SPIN * frames;

            if cursor.grabbing
                && within_reach(gift.actor.center(), cursor.pos)
                && gift.mark_caught()
            {
                catches += 1;
            }
        } else if gift.caught() {
            let target = cursor.pos - gift.actor.size / 2.0;
            gift.actor.pos = gift.actor.pos.lerp(target, HELD_FOLLOW);
            gift.actor.rotation += HELD_SPIN;
        }

        // Missed: shrink out below the bottom edge
        if gift.is_loose() && gift.actor.pos.y > bottom {
            gift.actor.target_scale = 0.0;
        }
    }

    for _ in 0..catches {
        register_catch(state);
    }
}

fn register_catch(state: &mut GameState) {
    let streak = state.combo.record_catch(state.time_ms);
    let points = state.combo.points();
    state.emit(GameEvent::ComboChanged(streak));
    state.add_score(points);
    if state.combo.shows_multiplier() {
        state.message(format!("{}x Combo!", streak), "#FFD700");
    }
}

fn update_adversaries(state: &mut GameState, dt_ms: f32) {
    let frames = frame_units(dt_ms);
    let mut thefts = 0;
    let GameState {
        adversaries,
        collectibles,
        ..
    } = &mut *state;

    for thief in adversaries.iter_mut() {
        thief.actor.ease_scale();

        if thief.target().is_none() {
            if let Some(id) = nearest_loose(collectibles, thief.actor.center()) {
                thief.lock_target(id);
            }
        }

        // A target that was caught, stolen by someone else or removed no
        // longer pulls the thief; it just keeps drifting.
        let pursuit = if thief.has_stolen {
            None
        } else {
            thief
                .target()
                .and_then(|id| collectibles.iter_mut().find(|c| c.id == id))
                .filter(|c| c.is_loose())
        };

        match pursuit {
            Some(gift) => {
                let to_gift = gift.actor.center() - thief.actor.center();
                if to_gift.length() < CATCH_RADIUS {
                    if gift.mark_stolen() {
                        thief.has_stolen = true;
                        thefts += 1;
                    }
                } else {
                    let step = to_gift.normalize_or_zero() * thief.actor.speed.abs() * frames;
                    thief.actor.pos += step;
                }
            }
            None => {
                thief.actor.pos.x += thief.actor.speed * frames;
            }
        }
    }

    for _ in 0..thefts {
        register_theft(state);
    }
}

fn register_theft(state: &mut GameState) {
    log::info!("Gift stolen at score {}", state.score);
    state.emit(GameEvent::Stolen);
    state.message("Present stolen!", "#FF0000");
    if state.combo.break_streak() {
        state.emit(GameEvent::ComboChanged(0));
    }
}

fn retire(state: &mut GameState) {
    let canvas = state.canvas;
    let GameState {
        adversaries,
        collectibles,
        ..
    } = &mut *state;

    let mut spent: Vec<CollectibleId> = Vec::new();
    adversaries.retain(|thief| {
        let margin = thief.actor.size.x * 2.0;
        let off_screen = thief.actor.pos.x < -margin || thief.actor.pos.x > canvas.x + margin;
        let theft_done = thief.has_stolen
            && thief
                .target()
                .and_then(|id| collectibles.iter().find(|c| c.id == id))
                .is_none_or(|gift| gift.actor.vanished());

        if !(off_screen || theft_done) {
            return true;
        }
        if thief.has_stolen {
            spent.extend(thief.target());
        }
        log::debug!("Retired thief {}", thief.id);
        false
    });

    collectibles.retain(|gift| {
        if spent.contains(&gift.id) {
            return false;
        }
        !(gift.is_loose() && gift.actor.pos.y > canvas.y && gift.actor.vanished())
    });
}
