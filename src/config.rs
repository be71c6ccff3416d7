//! Simulation timing configuration
//!
//! Defaults come from [`crate::consts`]; each value can be overridden from the
//! environment (`PONG_*` variables). Invalid overrides are logged and ignored.

use std::time::Duration;

use thiserror::Error;

use crate::consts;

/// Delays used by the match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Freeze after a goal before the countdown starts
    pub goal_pause: Duration,
    /// Time each countdown value stays on screen
    pub countdown_step: Duration,
    /// Freeze after the winning goal before navigation takes over
    pub win_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            goal_pause: consts::GOAL_PAUSE,
            countdown_step: consts::COUNTDOWN_STEP,
            win_delay: consts::WIN_DELAY,
        }
    }
}

/// Invalid configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tick interval cannot be zero")]
    ZeroTickInterval,
    #[error("target score must be at least 1")]
    ZeroTargetScore,
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Fixed interval between ticks
    pub tick_interval: Duration,
    pub timings: Timings,
    /// Score that wins a match started with this config
    pub target_score: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval: consts::TICK_INTERVAL,
            timings: Timings::default(),
            target_score: consts::TARGET_SCORE,
        }
    }
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Some(ms) = env_millis("PONG_TICK_MS") {
            if ms > 0 {
                config.tick_interval = Duration::from_millis(ms);
            } else {
                log::warn!("PONG_TICK_MS must be > 0, using default");
            }
        }
        if let Some(ms) = env_millis("PONG_GOAL_PAUSE_MS") {
            config.timings.goal_pause = Duration::from_millis(ms);
        }
        if let Some(ms) = env_millis("PONG_COUNTDOWN_STEP_MS") {
            config.timings.countdown_step = Duration::from_millis(ms);
        }
        if let Some(ms) = env_millis("PONG_WIN_DELAY_MS") {
            config.timings.win_delay = Duration::from_millis(ms);
        }

        if let Ok(raw) = std::env::var("PONG_TARGET_SCORE") {
            match raw.parse::<u32>() {
                Ok(score) if score > 0 => config.target_score = score,
                Ok(_) => log::warn!("PONG_TARGET_SCORE must be > 0, using default"),
                Err(_) => log::warn!("Invalid PONG_TARGET_SCORE '{}', using default", raw),
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.target_score == 0 {
            return Err(ConfigError::ZeroTargetScore);
        }
        Ok(())
    }
}

fn env_millis(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            log::warn!("Invalid {} '{}', using default", key, raw);
            None
        }
    }
}
