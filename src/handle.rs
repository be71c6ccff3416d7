//! Shared match handle
//!
//! The one place the match crosses threads. The driver and the input domain each
//! hold a clone; every read or write goes through the mutex, so paddle positions
//! and the phase are never observed half-updated.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::input::Intent;
use crate::render::MatchSnapshot;
use crate::settings::GameSettings;
use crate::sim::{Match, PaddleMove, Side};

/// Cloneable, thread-safe handle to the authoritative match
#[derive(Debug, Clone, Default)]
pub struct MatchHandle {
    inner: Arc<Mutex<Match>>,
}

impl MatchHandle {
    pub fn new(state: Match) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Run a closure with exclusive access to the match
    pub fn with<R>(&self, f: impl FnOnce(&mut Match) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Copy of the current state for drawing or inspection
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.inner.lock())
    }

    /// Apply an input intent. Returns true if it changed the match.
    pub fn apply(&self, intent: Intent) -> bool {
        let mut state = self.inner.lock();
        match intent {
            Intent::Resume => {
                let resumed = state.resume();
                if resumed {
                    log::info!("Match resumed");
                }
                resumed
            }
            Intent::Pause => {
                let paused = state.pause();
                if paused {
                    log::info!("Match paused");
                }
                paused
            }
            Intent::Move(side, direction) => state.move_paddle(side, direction),
        }
    }

    pub fn move_paddle(&self, side: Side, direction: PaddleMove) -> bool {
        self.apply(Intent::Move(side, direction))
    }

    pub fn pause(&self) -> bool {
        self.apply(Intent::Pause)
    }

    pub fn resume(&self) -> bool {
        self.apply(Intent::Resume)
    }

    pub fn reset(&self) {
        self.inner.lock().reset_game();
    }

    pub fn is_ball_moving(&self) -> bool {
        self.inner.lock().is_ball_moving()
    }

    pub fn apply_settings(&self, settings: &GameSettings) {
        settings.apply_to(&mut self.inner.lock());
    }

    pub fn capture_settings(&self) -> GameSettings {
        GameSettings::from_match(&self.inner.lock())
    }

    /// Rescale the match to a new surface size
    pub fn fit_to(&self, width: f64, height: f64) {
        self.inner.lock().fit_to(width, height);
    }

    /// Number of live clones (the driver holds one while running)
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}
