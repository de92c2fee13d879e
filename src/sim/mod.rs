//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM or
//! the drawing surface:
//! - Time only advances through an explicit `tick(dt)`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Interactions resolve before removals

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod combo;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use clock::{FrameClock, SimulationClock};
pub use collision::{adversary_touching, nearest_loose, within_reach};
pub use combo::ComboLedger;
pub use difficulty::DifficultyController;
pub use spawn::{SpawnTimers, spawn_due};
pub use state::{
    Actor, Adversary, Collectible, CollectibleId, EntrySide, GameEvent, GameState, SessionPhase,
};
pub use tick::{TickInput, TickOutcome, advance, tick};
