//! Frame-driven session loop
//!
//! The host owns the display timer and calls [`SimulationClock::frame`] once
//! per animation frame (or [`SimulationClock::step`] with an explicit delta).
//! Only an active session moves; rendering is the host's job every frame
//! regardless of phase.

use glam::Vec2;

use super::state::{GameEvent, GameState, SessionPhase};
use super::tick::{TickInput, TickOutcome, tick};
use crate::consts::MAX_FRAME_DELTA_MS;
use crate::gesture::CursorState;
use crate::highscores::{HighScore, HighScoreStore};

/// Turns display timestamps into clamped frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
    max_delta_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA_MS)
    }
}

impl FrameClock {
    pub fn new(max_delta_ms: f64) -> Self {
        Self {
            last_timestamp_ms: None,
            max_delta_ms,
        }
    }

    /// Elapsed ms since the previous call. The first frame is 0; long gaps
    /// (suspended tab) are clamped, time running backwards reads as 0.
    pub fn delta(&mut self, timestamp_ms: f64) -> f64 {
        let dt = match self.last_timestamp_ms {
            Some(last) => (timestamp_ms - last).clamp(0.0, self.max_delta_ms),
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        dt
    }

    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }
}

/// Session state machine: Idle -> Active -> Ended -> Active ...
#[derive(Debug)]
pub struct SimulationClock {
    pub state: GameState,
    frames: FrameClock,
    high_score: HighScore,
}

impl SimulationClock {
    pub fn new(seed: u64, canvas: Vec2, store: Box<dyn HighScoreStore>) -> Self {
        Self {
            state: GameState::new(seed, canvas),
            frames: FrameClock::default(),
            high_score: HighScore::load(store),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Begin a run from the menu or after a loss. Everything resets.
    /// Returns false (and changes nothing) while a run is active.
    pub fn start(&mut self, seed: u64) -> bool {
        if self.state.phase == SessionPhase::Active {
            log::debug!("Start ignored, session already active");
            return false;
        }
        self.state.reset(seed);
        self.state.phase = SessionPhase::Active;
        self.state.emit(GameEvent::SessionStarted);
        self.state.message("Game Started!", "#4CAF50");
        log::info!("Session started with seed {}", seed);
        true
    }

    /// Start again after a loss
    pub fn restart(&mut self, seed: u64) -> bool {
        if self.state.phase != SessionPhase::Ended {
            log::debug!("Restart ignored in {:?}", self.state.phase);
            return false;
        }
        self.start(seed)
    }

    /// End the active run early
    pub fn abort(&mut self) {
        if self.state.phase == SessionPhase::Active {
            log::info!("Session aborted");
            self.end_session();
        }
    }

    /// Run one display frame at `timestamp_ms`
    pub fn frame(&mut self, timestamp_ms: f64, cursor: CursorState) -> TickOutcome {
        let dt = self.frames.delta(timestamp_ms);
        self.step(dt as f32, cursor)
    }

    /// Run one tick with an explicit delta
    pub fn step(&mut self, dt_ms: f32, cursor: CursorState) -> TickOutcome {
        let outcome = tick(&mut self.state, &TickInput::new(cursor), dt_ms);
        if outcome == TickOutcome::PlayerCaught {
            self.end_session();
        }
        outcome
    }

    fn end_session(&mut self) {
        self.state.phase = SessionPhase::Ended;
        let final_score = self.state.score;
        let new_high_score = self.high_score.submit(final_score);
        if new_high_score {
            self.state.message("New High Score! 🏆", "#FFD700");
        }
        self.state.message("Game Over!", "#FF0000");
        self.state.emit(GameEvent::SessionEnded {
            final_score,
            new_high_score,
        });
        log::info!(
            "Session ended: score {} (best {}{})",
            final_score,
            self.high_score.best(),
            if new_high_score { ", new" } else { "" }
        );
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Take pending notifications for the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::spawn::spawn_adversary_at;
    use crate::sim::state::EntrySide;

    fn clock_with(store: &MemoryStore) -> SimulationClock {
        SimulationClock::new(1, Vec2::new(800.0, 600.0), Box::new(store.clone()))
    }

    fn far() -> CursorState {
        CursorState::new(-10_000.0, -10_000.0, false)
    }

    #[test]
    fn test_frame_clock_first_frame_and_clamp() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.delta(5000.0), 0.0);
        assert_eq!(clock.delta(5016.0), 16.0);
        assert_eq!(clock.delta(65_000.0), MAX_FRAME_DELTA_MS);
        assert_eq!(clock.delta(64_000.0), 0.0);
        clock.reset();
        assert_eq!(clock.delta(1.0), 0.0);
    }

    #[test]
    fn test_idle_is_frozen() {
        let store = MemoryStore::new();
        let mut sim = clock_with(&store);
        assert_eq!(sim.phase(), SessionPhase::Idle);
        sim.frame(0.0, far());
        assert_eq!(sim.frame(16.0, far()), TickOutcome::Inactive);
        assert!(sim.state.collectibles.is_empty());
        assert_eq!(sim.state.time_ms, 0.0);
    }

    #[test]
    fn test_start_is_ignored_while_active() {
        let store = MemoryStore::new();
        let mut sim = clock_with(&store);
        assert!(!sim.restart(5));
        assert!(sim.start(5));
        assert!(!sim.start(6));
        assert_eq!(sim.state.seed, 5);
        assert!(sim.drain_events().contains(&GameEvent::SessionStarted));
    }

    #[test]
    fn test_loss_ends_session_and_saves_best() {
        let store = MemoryStore::with_score(5);
        let mut sim = clock_with(&store);
        sim.start(9);
        sim.state.score = 40;
        spawn_adversary_at(&mut sim.state, EntrySide::Left, 0.0);
        let thief = sim.state.adversaries.last_mut().unwrap();
        thief.actor.set_center(Vec2::new(300.0, 300.0));

        let outcome = sim.step(16.0, CursorState::new(300.0, 300.0, false));
        assert_eq!(outcome, TickOutcome::PlayerCaught);
        assert_eq!(sim.phase(), SessionPhase::Ended);
        assert_eq!(store.get(), 40);
        assert_eq!(sim.high_score(), 40);
        assert!(sim.drain_events().contains(&GameEvent::SessionEnded {
            final_score: 40,
            new_high_score: true,
        }));

        // Frozen afterwards
        let time = sim.state.time_ms;
        assert_eq!(sim.step(16.0, far()), TickOutcome::Inactive);
        assert_eq!(sim.state.time_ms, time);
    }

    #[test]
    fn test_restart_resets_everything() {
        let store = MemoryStore::with_score(1000);
        let mut sim = clock_with(&store);
        sim.start(1);
        for _ in 0..30 {
            sim.step(16.0, far());
        }
        sim.state.score = 150;
        sim.step(16.0, far());
        assert!(!sim.state.collectibles.is_empty());
        sim.abort();
        assert_eq!(sim.phase(), SessionPhase::Ended);
        assert_eq!(store.get(), 1000);

        assert!(sim.restart(2));
        assert_eq!(sim.phase(), SessionPhase::Active);
        assert_eq!(sim.state.score, 0);
        assert_eq!(sim.state.combo.streak(), 0);
        assert_eq!(sim.state.difficulty.tier(), crate::tuning::DifficultyTier::Low);
        assert!(sim.state.collectibles.is_empty());
        assert!(sim.state.adversaries.is_empty());
        assert_eq!(sim.state.time_ms, 0.0);
    }

    #[test]
    fn test_abort_outside_active_is_noop() {
        let store = MemoryStore::new();
        let mut sim = clock_with(&store);
        sim.abort();
        assert_eq!(sim.phase(), SessionPhase::Idle);
        assert!(sim.drain_events().is_empty());
    }
}
