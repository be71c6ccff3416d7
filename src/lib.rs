//! Rally Pong - a two-player paddle and ball game
//!
//! Core modules:
//! - `sim`: Simulation (ball physics, collisions, match phases)
//! - `driver`: Fixed-interval simulation thread
//! - `handle`: Thread-safe ownership boundary around the match
//! - `render`: Render request queue and collaborator traits
//! - `input`: Keyboard mapping to match intents
//! - `settings`: Game settings applied to / captured from a match
//! - `config`: Simulation timings

pub mod config;
pub mod driver;
pub mod handle;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, SimConfig, Timings};
pub use driver::{DriverError, DriverHandle, SimulationDriver};
pub use handle::MatchHandle;
pub use input::{Intent, Key};
pub use render::{
    MatchSnapshot, Navigator, PlayerView, RenderQueue, RenderRequest, RenderSender, RenderSurface,
    render_channel,
};
pub use settings::{GameSettings, PaddleSize, PaddleThickness, SettingsError};
pub use sim::{GameEvent, Match, MatchPhase, Side, tick};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation interval
    pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

    /// Default playfield dimensions
    pub const FIELD_WIDTH: f64 = 1100.0;
    pub const FIELD_HEIGHT: f64 = 650.0;

    /// Points needed to win a match
    pub const TARGET_SCORE: u32 = 10;

    /// Ball defaults (speed is pixels per tick)
    pub const BALL_RADIUS: f64 = 15.0;
    pub const BALL_SPEED: f64 = 1.5;
    pub const BALL_SPEED_INCREMENT: f64 = 0.5;
    /// Share of the paddle offset that bends the vertical direction on a bounce
    pub const DEFLECTION_FACTOR: f64 = 0.5;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f64 = 15.0;
    pub const PADDLE_LENGTH: f64 = 90.0;
    /// Gap between a paddle and its side of the field
    pub const PADDLE_INSET: f64 = 20.0;
    /// Distance a paddle travels per move intent
    pub const PADDLE_STEP: f64 = 10.0;

    /// A ball this close to a side line counts as a goal
    pub const SCORE_MARGIN: f64 = 10.0;

    /// Phase timings
    pub const GOAL_PAUSE: Duration = Duration::from_millis(1000);
    pub const COUNTDOWN_STEP: Duration = Duration::from_millis(1000);
    pub const WIN_DELAY: Duration = Duration::from_millis(4000);
    /// First countdown value shown after a goal (counts down to 0 = "Go")
    pub const COUNTDOWN_START: u8 = 3;
}
