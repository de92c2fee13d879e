//! Perception lifecycle and cursor handoff
//!
//! The perception engine (camera + hand model) runs outside the crate and
//! calls back with landmarks per processed camera frame. [`HandTracker`]
//! tracks whether that engine is running, throttles its output and feeds the
//! [`GestureFilter`]. The resulting cursor crosses over to the simulation
//! through a [`CursorSlot`]: one writer, one reader, last value wins.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use thiserror::Error;

use super::filter::GestureFilter;
use super::landmarks::HandLandmarks;
use super::{CursorState, UPDATE_INTERVAL_MS};
use crate::settings::Settings;

/// Failure to bring up the perception engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PerceptionError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("hand tracking unavailable: {0}")]
    Unavailable(String),
}

/// Lifecycle of the external perception engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerStatus {
    Stopped,
    Starting,
    Running,
}

/// What the host has to do before a session may begin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLaunch {
    /// Tracking is live, start the session right away
    Ready,
    /// Tracking is off: bring it up and start once it resolves successfully
    StartTracking,
    /// A start is already in flight
    Pending,
}

/// Perception lifecycle + throttle + filter
#[derive(Debug)]
pub struct HandTracker {
    status: TrackerStatus,
    filter: GestureFilter,
    last_update_ms: Option<f64>,
}

impl Default for HandTracker {
    fn default() -> Self {
        Self::new(GestureFilter::default())
    }
}

impl HandTracker {
    pub fn new(filter: GestureFilter) -> Self {
        Self {
            status: TrackerStatus::Stopped,
            filter,
            last_update_ms: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(GestureFilter::new(settings.smoothing, settings.curl_threshold))
    }

    pub fn status(&self) -> TrackerStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == TrackerStatus::Running
    }

    /// Gate for starting or restarting a session
    pub fn session_launch(&self) -> SessionLaunch {
        match self.status {
            TrackerStatus::Running => SessionLaunch::Ready,
            TrackerStatus::Stopped => SessionLaunch::StartTracking,
            TrackerStatus::Starting => SessionLaunch::Pending,
        }
    }

    /// Ask to start the engine. Returns true when the caller should actually
    /// start it; a tracker already starting or running ignores the request.
    pub fn request_start(&mut self) -> bool {
        match self.status {
            TrackerStatus::Stopped => {
                self.status = TrackerStatus::Starting;
                true
            }
            TrackerStatus::Starting | TrackerStatus::Running => {
                log::debug!("Start requested while {:?}, ignoring", self.status);
                false
            }
        }
    }

    /// Report how the engine start went
    pub fn start_resolved(
        &mut self,
        result: Result<(), PerceptionError>,
    ) -> Result<(), PerceptionError> {
        if self.status != TrackerStatus::Starting {
            log::debug!("Stale start result while {:?}", self.status);
            return result;
        }
        match result {
            Ok(()) => {
                self.status = TrackerStatus::Running;
                self.last_update_ms = None;
                log::info!("Hand tracking started");
                Ok(())
            }
            Err(e) => {
                self.status = TrackerStatus::Stopped;
                log::warn!("Hand tracking failed to start: {}", e);
                Err(e)
            }
        }
    }

    /// Stop tracking. Returns true when the caller should stop the engine.
    pub fn stop(&mut self) -> bool {
        let was = self.status;
        self.status = TrackerStatus::Stopped;
        if was == TrackerStatus::Stopped {
            return false;
        }
        log::info!("Hand tracking stopped");
        true
    }

    /// Handle one batch of detections. Returns a cursor update when one is due:
    /// the engine is running, the throttle interval has passed and a hand was seen.
    pub fn on_results(
        &mut self,
        now_ms: f64,
        hands: &[HandLandmarks],
        canvas: Vec2,
    ) -> Option<CursorState> {
        if self.status != TrackerStatus::Running {
            return None;
        }
        if let Some(last) = self.last_update_ms {
            if now_ms - last < UPDATE_INTERVAL_MS {
                return None;
            }
        }
        self.last_update_ms = Some(now_ms);

        let hand = hands.first()?;
        Some(self.filter.update(hand, canvas))
    }

    pub fn cursor(&self) -> CursorState {
        self.filter.cursor()
    }
}

/// Single-producer/single-consumer cursor cell
pub struct CursorSlot;

impl CursorSlot {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (CursorWriter, CursorReader) {
        let cell = Rc::new(Cell::new(CursorState::default()));
        (CursorWriter { cell: cell.clone() }, CursorReader { cell })
    }
}

/// Writing half, owned by the gesture callback
#[derive(Debug)]
pub struct CursorWriter {
    cell: Rc<Cell<CursorState>>,
}

impl CursorWriter {
    pub fn publish(&self, cursor: CursorState) {
        self.cell.set(cursor);
    }
}

/// Reading half, owned by the simulation loop
#[derive(Debug)]
pub struct CursorReader {
    cell: Rc<Cell<CursorState>>,
}

impl CursorReader {
    pub fn latest(&self) -> CursorState {
        self.cell.get()
    }
}
