//! Match simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Phase timers advance with the tick, never with wall-clock sleeps
//! - No rendering, threading or platform dependencies

pub mod collision;
pub mod resize;
pub mod state;
pub mod tick;

pub use collision::{
    PaddleContact, ball_paddle_overlap, goal_scorer, resolve_paddle_collisions,
    resolve_paddle_hit, resolve_wall_collision, wall_collision,
};
pub use resize::Resizable;
pub use state::{
    Ball, Match, MatchPhase, Paddle, PaddleMove, PaddleSize, PaddleThickness, Player, Side,
};
pub use tick::{GameEvent, tick};
