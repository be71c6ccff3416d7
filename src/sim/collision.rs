//! Collision detection and scoring
//!
//! Everything here is axis-aligned: the walls are horizontal lines, paddles are
//! rectangles, and the ball is tested as its bounding square against them.

use super::state::{Ball, Paddle, Side};
use crate::consts::SCORE_MARGIN;

/// How the ball met a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleContact {
    /// Struck the bat face; full bounce applied
    Face,
    /// Clipped the paddle's top or bottom end; only the vertical direction flipped
    Corner,
}

/// Check whether the ball touches the top or bottom wall.
///
/// The margin is the ball's diameter measured from its center, so the bounce
/// happens a radius earlier than the visible edge.
pub fn wall_collision(ball: &Ball, field_height: f64) -> bool {
    let margin = ball.radius * 2.0;
    ball.pos.y - margin <= 0.0 || ball.pos.y + margin >= field_height
}

/// Flip the ball's vertical direction if it touches a wall. Returns true on a bounce.
pub fn resolve_wall_collision(ball: &mut Ball, field_height: f64) -> bool {
    if wall_collision(ball, field_height) {
        ball.flip_vertical();
        true
    } else {
        false
    }
}

/// Who scores, if the ball has reached either side line
pub fn goal_scorer(ball: &Ball, field_width: f64) -> Option<Side> {
    if ball.pos.x < SCORE_MARGIN {
        Some(Side::Right)
    } else if ball.pos.x > field_width - SCORE_MARGIN {
        Some(Side::Left)
    } else {
        None
    }
}

/// Bounding-square overlap between the ball and a paddle rectangle
pub fn ball_paddle_overlap(ball: &Ball, paddle: &Paddle) -> bool {
    let r = ball.radius;
    !(ball.pos.x + r < paddle.pos.x
        || ball.pos.x - r > paddle.pos.x + paddle.width
        || ball.pos.y + r < paddle.pos.y
        || ball.pos.y - r > paddle.pos.y + paddle.length)
}

/// Respond to a ball that overlaps a paddle
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle) -> PaddleContact {
    let hit = ball.pos.y - paddle.pos.y;
    if hit <= 0.0 || hit >= paddle.length {
        ball.flip_vertical();
        PaddleContact::Corner
    } else {
        ball.bounce_off(paddle);
        PaddleContact::Face
    }
}

/// Check both paddles, left first. At most one paddle is resolved per call.
pub fn resolve_paddle_collisions(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
) -> Option<(Side, PaddleContact)> {
    if ball_paddle_overlap(ball, left) {
        Some((Side::Left, resolve_paddle_hit(ball, left)))
    } else if ball_paddle_overlap(ball, right) {
        Some((Side::Right, resolve_paddle_hit(ball, right)))
    } else {
        None
    }
}
