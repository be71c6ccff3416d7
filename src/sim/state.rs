//! Match state and core simulation types
//!
//! Everything the driver thread advances each tick lives here. The paused and
//! ball-moving flags are derived from [`MatchPhase`], so they can never disagree.

use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which player (and which side of the field) something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1, defending the left edge
    Left,
    /// Player 2, defending the right edge
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for a resume request (initial state)
    Paused,
    /// Ball in play
    Running,
    /// Short freeze right after a goal
    GoalPause { scorer: Side, remaining: Duration },
    /// Counting down to the next rally; `value` 0 is "Go"
    Countdown { value: u8, remaining: Duration },
    /// Match over. `hand_off_in` becomes `None` once navigation was notified.
    Won {
        winner: Side,
        hand_off_in: Option<Duration>,
    },
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Paused => "paused",
            MatchPhase::Running => "running",
            MatchPhase::GoalPause { .. } => "goal",
            MatchPhase::Countdown { .. } => "countdown",
            MatchPhase::Won { .. } => "won",
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub radius: f64,
    /// Per-axis direction in [-1, 1]. Not normalized; the axes change independently.
    pub direction: DVec2,
    /// Distance travelled per tick along each axis (scaled by `direction`)
    pub speed: f64,
    /// Added to `speed` on every paddle bounce
    pub speed_increment: f64,
    /// Speed restored after a goal
    pub base_speed: f64,
}

impl Ball {
    /// Create a ball centered in a field of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            pos: DVec2::new(width / 2.0, height / 2.0),
            radius: BALL_RADIUS,
            direction: DVec2::ONE,
            speed: BALL_SPEED,
            speed_increment: BALL_SPEED_INCREMENT,
            base_speed: BALL_SPEED,
        }
    }

    /// Move one tick along the current direction
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.direction * self.speed;
    }

    /// Bounce off a paddle face.
    ///
    /// Flips the horizontal direction, speeds up, and bends the vertical direction
    /// by how far from the paddle center the ball struck.
    pub fn bounce_off(&mut self, paddle: &Paddle) {
        self.direction.x = -self.direction.x;
        self.speed += self.speed_increment;

        let half = paddle.length / 2.0;
        let hit = self.pos.y - paddle.pos.y;
        let relative = (hit - half) / half;
        self.direction.y = (self.direction.y + relative * DEFLECTION_FACTOR).clamp(-1.0, 1.0);
    }

    pub fn flip_vertical(&mut self) {
        self.direction.y = -self.direction.y;
    }

    /// Recenter in the field. Speed and direction are left alone.
    pub fn reset_position(&mut self, width: f64, height: f64) {
        self.pos = DVec2::new(width / 2.0, height / 2.0);
    }

    pub fn reset_speed(&mut self) {
        self.speed = self.base_speed;
    }

    pub fn reset_direction(&mut self) {
        self.direction = DVec2::ONE;
    }

    /// Set both the current and the base speed
    pub fn set_base_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.base_speed = speed;
    }
}

/// Paddle length category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaddleSize {
    Small = 1,
    #[default]
    Medium = 2,
    Large = 3,
}

impl PaddleSize {
    /// Paddle length as a share of the field height
    pub fn length_for(self, field_height: f64) -> f64 {
        let percent = match self {
            PaddleSize::Small => 5.0,
            PaddleSize::Medium => 14.0,
            PaddleSize::Large => 24.0,
        };
        field_height / 100.0 * percent
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleSize::Small => "Small",
            PaddleSize::Medium => "Medium",
            PaddleSize::Large => "Large",
        }
    }
}

/// Paddle width category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaddleThickness {
    Slim = 1,
    #[default]
    Average = 2,
    Thick = 3,
}

impl PaddleThickness {
    /// Paddle width as a share of the field width
    pub fn width_for(self, field_width: f64) -> f64 {
        let percent = match self {
            PaddleThickness::Slim => 0.72,
            PaddleThickness::Average => 1.36,
            PaddleThickness::Thick => 2.0,
        };
        field_width / 100.0 * percent
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleThickness::Slim => "Slim",
            PaddleThickness::Average => "Average",
            PaddleThickness::Thick => "Thick",
        }
    }
}

/// A player's paddle. `pos` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: DVec2,
    /// Vertical extent
    pub length: f64,
    /// Horizontal extent
    pub width: f64,
    pub size: PaddleSize,
    pub thickness: PaddleThickness,
}

impl Paddle {
    /// Create a left-side paddle centered vertically
    pub fn new(field_height: f64) -> Self {
        Self {
            pos: DVec2::new(PADDLE_INSET, field_height / 2.0 - PADDLE_LENGTH / 2.0),
            length: PADDLE_LENGTH,
            width: PADDLE_WIDTH,
            size: PaddleSize::default(),
            thickness: PaddleThickness::default(),
        }
    }

    pub fn move_up(&mut self) {
        self.pos.y = (self.pos.y - PADDLE_STEP).max(0.0);
    }

    pub fn move_down(&mut self, field_height: f64) {
        let lower_bound = (field_height - self.length).max(0.0);
        self.pos.y = (self.pos.y + PADDLE_STEP).min(lower_bound);
    }

    pub fn reset_position(&mut self, field_height: f64) {
        self.pos.y = field_height / 2.0 - self.length / 2.0;
    }

    /// Resize to a length category, keeping the paddle's top edge
    pub fn apply_size(&mut self, size: PaddleSize, field_height: f64) {
        self.size = size;
        self.length = size.length_for(field_height);
    }

    pub fn apply_thickness(&mut self, thickness: PaddleThickness, field_width: f64) {
        self.thickness = thickness;
        self.width = thickness.width_for(field_width);
    }
}

/// A player and their paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
    pub paddle: Paddle,
}

impl Player {
    pub fn new(name: impl Into<String>, field_height: f64) -> Self {
        Self {
            name: name.into(),
            score: 0,
            paddle: Paddle::new(field_height),
        }
    }

    pub fn score_point(&mut self) {
        self.score += 1;
    }
}

/// Which way a paddle should move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleMove {
    Up,
    Down,
}

/// Complete match state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub ball: Ball,
    /// Player 1 (left)
    pub left: Player,
    /// Player 2 (right)
    pub right: Player,
    pub width: f64,
    pub height: f64,
    /// Score that ends the match
    pub target_score: u32,
    pub phase: MatchPhase,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Create a paused match with the default field and entities
    pub fn new() -> Self {
        Self::with_field(FIELD_WIDTH, FIELD_HEIGHT)
    }

    /// Create a paused match on a field of the given size
    pub fn with_field(width: f64, height: f64) -> Self {
        let mut state = Self {
            ball: Ball::new(width, height),
            left: Player::new("PLAYER 1", height),
            right: Player::new("PLAYER 2", height),
            width,
            height,
            target_score: TARGET_SCORE,
            phase: MatchPhase::Paused,
        };
        state.place_right_paddle();
        state
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// True whenever the ball is not in play
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase != MatchPhase::Running
    }

    #[inline]
    pub fn is_ball_moving(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn is_won(&self) -> bool {
        matches!(self.phase, MatchPhase::Won { .. })
    }

    /// Stop play. Returns false if there was nothing to pause.
    pub fn pause(&mut self) -> bool {
        match self.phase {
            MatchPhase::Running | MatchPhase::GoalPause { .. } | MatchPhase::Countdown { .. } => {
                self.phase = MatchPhase::Paused;
                true
            }
            MatchPhase::Paused | MatchPhase::Won { .. } => false,
        }
    }

    /// Put the ball in play. Only honored while paused.
    pub fn resume(&mut self) -> bool {
        if self.phase == MatchPhase::Paused {
            self.phase = MatchPhase::Running;
            true
        } else {
            false
        }
    }

    /// Move a paddle, keeping it inside the field. Ignored unless the ball is in play.
    pub fn move_paddle(&mut self, side: Side, direction: PaddleMove) -> bool {
        if !self.is_ball_moving() {
            return false;
        }
        let height = self.height;
        let paddle = &mut self.player_mut(side).paddle;
        match direction {
            PaddleMove::Up => paddle.move_up(),
            PaddleMove::Down => paddle.move_down(height),
        }
        true
    }

    /// Start over: ball, paddles and scores back to their initial state, paused
    pub fn reset_game(&mut self) {
        self.ball.reset_position(self.width, self.height);
        self.ball.reset_speed();
        self.ball.reset_direction();
        self.left.score = 0;
        self.right.score = 0;
        self.left.paddle.reset_position(self.height);
        self.right.paddle.reset_position(self.height);
        self.place_right_paddle();
        self.phase = MatchPhase::Paused;
    }

    /// Put the paddles and ball back in their serving positions after a goal
    pub fn reset_for_serve(&mut self) {
        self.left.paddle.reset_position(self.height);
        self.right.paddle.reset_position(self.height);
        self.ball.reset_position(self.width, self.height);
        self.ball.reset_speed();
        self.ball.reset_direction();
    }

    /// Keep the right paddle inset from the right edge
    pub fn place_right_paddle(&mut self) {
        let paddle = &mut self.right.paddle;
        paddle.pos.x = self.width - paddle.width - PADDLE_INSET;
    }

    /// Apply a length category to both paddles
    pub fn set_paddle_size(&mut self, size: PaddleSize) {
        let height = self.height;
        self.left.paddle.apply_size(size, height);
        self.right.paddle.apply_size(size, height);
    }

    /// Apply a width category to both paddles
    pub fn set_paddle_thickness(&mut self, thickness: PaddleThickness) {
        let width = self.width;
        self.left.paddle.apply_thickness(thickness, width);
        self.right.paddle.apply_thickness(thickness, width);
        self.place_right_paddle();
    }
}
