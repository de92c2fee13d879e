//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::gesture::{DEFAULT_CURL_THRESHOLD, DEFAULT_SMOOTHING};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Hand tracking ===
    /// Cursor smoothing factor (0 = frozen, 1 = raw)
    pub smoothing: f32,
    /// Fingertip-to-palm offset below which a finger counts as curled
    pub curl_threshold: f32,

    // === Visual Effects ===
    /// Animated starfield behind the playfield
    pub starfield: bool,
    /// Drop shadows under gifts
    pub shadows: bool,

    // === HUD ===
    /// Show the hand position readout
    pub show_hand_readout: bool,

    // === Accessibility ===
    /// Reduced motion (freezes the starfield)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            curl_threshold: DEFAULT_CURL_THRESHOLD,

            starfield: true,
            shadows: true,

            show_hand_readout: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective starfield animation (respects reduced_motion)
    pub fn effective_starfield_motion(&self) -> bool {
        self.starfield && !self.reduced_motion
    }

    /// Clamp tuning values into usable ranges (hand-edited storage may hold anything)
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.smoothing = if self.smoothing.is_finite() {
            self.smoothing.clamp(0.05, 1.0)
        } else {
            defaults.smoothing
        };
        self.curl_threshold = if self.curl_threshold.is_finite() {
            self.curl_threshold.clamp(0.01, 1.0)
        } else {
            defaults.curl_threshold
        };
        self
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gift_grab_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings.sanitized();
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
