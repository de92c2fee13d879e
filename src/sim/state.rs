//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]. The renderer and the
//! host only ever see it by shared reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::combo::ComboLedger;
use super::difficulty::DifficultyController;
use super::spawn::SpawnTimers;
use crate::approach;
use crate::consts::*;
use crate::tuning::DifficultyTier;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Menu, before the first start
    Idle,
    /// Active gameplay
    Active,
    /// Run ended, waiting for restart
    Ended,
}

/// Side of the canvas a thief enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySide {
    Left,
    Right,
}

impl EntrySide {
    /// Sign of the horizontal drift
    pub fn sign(&self) -> f32 {
        match self {
            EntrySide::Left => 1.0,
            EntrySide::Right => -1.0,
        }
    }
}

/// Handle to a gift. Thieves hold these instead of references; a handle whose
/// gift has been removed simply no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectibleId(pub u32);

/// Shape shared by gifts and thieves
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Top-left corner in canvas pixels
    pub pos: Vec2,
    /// Pixels per 60 Hz frame (signed for thieves)
    pub speed: f32,
    pub size: Vec2,
    pub rotation: f32,
    /// Current visual scale; only ever eased toward `target_scale`
    pub scale: f32,
    pub target_scale: f32,
}

impl Actor {
    /// New actor popping in from scale 0
    pub fn new(pos: Vec2, speed: f32, size: f32, rotation: f32) -> Self {
        Self {
            pos,
            speed,
            size: Vec2::splat(size),
            rotation,
            scale: 0.0,
            target_scale: 1.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Move so that the center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size / 2.0;
    }

    /// One step of scale easing
    pub fn ease_scale(&mut self) {
        self.scale = approach(self.scale, self.target_scale, SCALE_EASING);
    }

    /// Shrunk to effectively nothing
    pub fn vanished(&self) -> bool {
        self.scale < VANISH_SCALE
    }
}

/// A falling gift
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub id: CollectibleId,
    pub actor: Actor,
    /// Wrapping color from the palette
    pub color: &'static str,
    caught: bool,
    stolen: bool,
}

impl Collectible {
    pub fn new(id: CollectibleId, actor: Actor, color: &'static str) -> Self {
        Self {
            id,
            actor,
            color,
            caught: false,
            stolen: false,
        }
    }

    pub fn caught(&self) -> bool {
        self.caught
    }

    pub fn stolen(&self) -> bool {
        self.stolen
    }

    /// Neither caught nor stolen
    pub fn is_loose(&self) -> bool {
        !self.caught && !self.stolen
    }

    /// Player grabbed it. Returns false if it was already claimed.
    pub fn mark_caught(&mut self) -> bool {
        if !self.is_loose() {
            return false;
        }
        self.caught = true;
        self.actor.target_scale = CATCH_POP_SCALE;
        true
    }

    /// A thief got it first. Returns false if it was already claimed.
    pub fn mark_stolen(&mut self) -> bool {
        if !self.is_loose() {
            return false;
        }
        self.stolen = true;
        self.actor.target_scale = 0.0;
        true
    }
}

/// A roaming gift thief
#[derive(Debug, Clone, PartialEq)]
pub struct Adversary {
    pub id: u32,
    pub actor: Actor,
    pub side: EntrySide,
    target: Option<CollectibleId>,
    pub has_stolen: bool,
}

impl Adversary {
    pub fn new(id: u32, actor: Actor, side: EntrySide) -> Self {
        Self {
            id,
            actor,
            side,
            target: None,
            has_stolen: false,
        }
    }

    pub fn target(&self) -> Option<CollectibleId> {
        self.target
    }

    /// Lock onto a gift. The first lock is permanent; later calls are refused.
    pub fn lock_target(&mut self, id: CollectibleId) -> bool {
        if self.target.is_some() {
            return false;
        }
        self.target = Some(id);
        true
    }
}

/// Notifications for the host UI. Display only; nothing waits on them.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    ScoreChanged { delta: u64, total: u64 },
    /// Current combo streak (after a catch, timeout or theft)
    ComboChanged(u32),
    TierChanged(DifficultyTier),
    /// A thief took a gift
    Stolen,
    /// Transient banner text
    Message { text: String, color: &'static str },
    SessionEnded { final_score: u64, new_high_score: bool },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    /// Canvas size in pixels, updated live on resize
    pub canvas: Vec2,
    /// Session time (ms of simulated play)
    pub time_ms: f64,
    pub score: u64,
    pub combo: ComboLedger,
    pub difficulty: DifficultyController,
    pub spawn_timers: SpawnTimers,
    /// Live gifts (spawn order)
    pub collectibles: Vec<Collectible>,
    /// Live thieves (spawn order)
    pub adversaries: Vec<Adversary>,
    /// Pending notifications, drained by the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game state
    pub fn new(seed: u64, canvas: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Idle,
            canvas,
            time_ms: 0.0,
            score: 0,
            combo: ComboLedger::default(),
            difficulty: DifficultyController::default(),
            spawn_timers: SpawnTimers::default(),
            collectibles: Vec::new(),
            adversaries: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Back to initial values for a new run with `seed`. Canvas size and
    /// undrained events survive.
    pub fn reset(&mut self, seed: u64) {
        let canvas = self.canvas;
        let events = std::mem::take(&mut self.events);
        *self = Self::new(seed, canvas);
        self.events = events;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn collectible(&self, id: CollectibleId) -> Option<&Collectible> {
        self.collectibles.iter().find(|c| c.id == id)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn message(&mut self, text: impl Into<String>, color: &'static str) {
        self.events.push(GameEvent::Message {
            text: text.into(),
            color,
        });
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.events.push(GameEvent::ScoreChanged {
            delta: points,
            total: self.score,
        });
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gift() -> Collectible {
        Collectible::new(
            CollectibleId(1),
            Actor::new(Vec2::ZERO, 2.0, COLLECTIBLE_SIZE, 0.0),
            "#FF4444",
        )
    }

    #[test]
    fn test_caught_and_stolen_are_exclusive() {
        let mut c = gift();
        assert!(c.mark_caught());
        assert!(!c.mark_stolen());
        assert!(!c.mark_caught());
        assert!(c.caught() && !c.stolen());

        let mut c = gift();
        assert!(c.mark_stolen());
        assert!(!c.mark_caught());
        assert!(c.stolen() && !c.caught());
        assert_eq!(c.actor.target_scale, 0.0);
    }

    #[test]
    fn test_target_lock_is_permanent() {
        let actor = Actor::new(Vec2::ZERO, 3.0, ADVERSARY_SIZE, 0.0);
        let mut a = Adversary::new(1, actor, EntrySide::Left);
        assert!(a.lock_target(CollectibleId(4)));
        assert!(!a.lock_target(CollectibleId(5)));
        assert_eq!(a.target(), Some(CollectibleId(4)));
    }

    #[test]
    fn test_scale_eases_and_vanishes() {
        let mut actor = Actor::new(Vec2::ZERO, 0.0, 10.0, 0.0);
        actor.ease_scale();
        assert!((actor.scale - 0.1).abs() < 1e-6);

        actor.scale = 1.0;
        actor.target_scale = 0.0;
        let mut ticks = 0;
        while !actor.vanished() {
            actor.ease_scale();
            ticks += 1;
        }
        // 0.9^22 < 0.1
        assert_eq!(ticks, 22);
    }

    #[test]
    fn test_center_roundtrip() {
        let mut actor = Actor::new(Vec2::new(10.0, 20.0), 0.0, 40.0, 0.0);
        assert_eq!(actor.center(), Vec2::new(30.0, 40.0));
        actor.set_center(Vec2::new(100.0, 100.0));
        assert_eq!(actor.pos, Vec2::new(80.0, 80.0));
    }

    #[test]
    fn test_reset_keeps_canvas() {
        let mut state = GameState::new(1, Vec2::new(640.0, 480.0));
        state.score = 90;
        state.next_entity_id();
        state.reset(2);
        assert_eq!(state.score, 0);
        assert_eq!(state.canvas, Vec2::new(640.0, 480.0));
        assert_eq!(state.seed, 2);
        assert_eq!(state.next_entity_id(), 1);
    }
}
