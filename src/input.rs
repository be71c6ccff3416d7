//! Keyboard input mapping
//!
//! The input domain turns key presses into [`Intent`]s and hands them to
//! [`crate::MatchHandle::apply`]. No queueing: each intent takes effect as soon as
//! the match lock is free.

use serde::{Deserialize, Serialize};

use crate::sim::{PaddleMove, Side};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    /// Player 2 up
    Up,
    /// Player 2 down
    Down,
    /// Player 1 up
    A,
    /// Player 1 down
    Z,
}

impl Key {
    /// Parse a key name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "enter" | "return" => Some(Key::Enter),
            "escape" | "esc" => Some(Key::Escape),
            "up" | "arrowup" => Some(Key::Up),
            "down" | "arrowdown" => Some(Key::Down),
            "a" => Some(Key::A),
            "z" => Some(Key::Z),
            _ => None,
        }
    }

    /// What pressing this key asks the match to do
    pub fn intent(self) -> Intent {
        match self {
            Key::Enter => Intent::Resume,
            Key::Escape => Intent::Pause,
            Key::Up => Intent::Move(Side::Right, PaddleMove::Up),
            Key::Down => Intent::Move(Side::Right, PaddleMove::Down),
            Key::A => Intent::Move(Side::Left, PaddleMove::Up),
            Key::Z => Intent::Move(Side::Left, PaddleMove::Down),
        }
    }
}

/// A discrete request from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Start or continue play (only honored while paused)
    Resume,
    /// Stop play
    Pause,
    /// Step a paddle (only honored while the ball is moving)
    Move(Side, PaddleMove),
}
