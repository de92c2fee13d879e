//! High score tracking
//!
//! The game keeps a single best score. Where it lives is the host's business:
//! the simulation only talks to a [`HighScoreStore`].

use std::cell::Cell;
use std::rc::Rc;

/// Persistence port for the best score
pub trait HighScoreStore {
    /// Read the stored best score (0 when nothing is stored)
    fn load(&self) -> u64;
    /// Persist a new best score
    fn save(&mut self, score: u64);
}

/// In-memory store (native runs, tests)
///
/// Clones share the same cell, so a test can keep a handle and inspect what
/// the session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            value: Rc::new(Cell::new(score)),
        }
    }

    pub fn get(&self) -> u64 {
        self.value.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value.get()
    }

    fn save(&mut self, score: u64) {
        self.value.set(score);
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "gift_grab_highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.map(|raw| serde_json::from_str::<u64>(&raw)) {
            Some(Ok(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Some(Err(e)) => {
                log::warn!("Ignoring unreadable high score: {}", e);
                0
            }
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(&score) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score saved ({})", score);
            }
        }
    }
}

/// In-memory view of the best score, backed by a store
pub struct HighScore {
    best: u64,
    store: Box<dyn HighScoreStore>,
}

impl HighScore {
    /// Read the best score from `store` once, at startup
    pub fn load(store: Box<dyn HighScoreStore>) -> Self {
        let best = store.load();
        Self { best, store }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished session's score. Returns true (and persists) when it
    /// is a new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        self.store.save(score);
        true
    }
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").field("best", &self.best).finish()
    }
}
