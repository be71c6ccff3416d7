//! Scaling entities when the play surface changes size

use super::state::{Ball, Match, Paddle};

/// Something that scales with the play surface, independently per axis
pub trait Resizable {
    fn resize_x(&mut self, factor: f64);
    fn resize_y(&mut self, factor: f64);
}

impl Resizable for Ball {
    fn resize_x(&mut self, factor: f64) {
        self.pos.x *= factor;
        self.radius *= factor;
    }

    fn resize_y(&mut self, factor: f64) {
        self.pos.y *= factor;
    }
}

impl Resizable for Paddle {
    fn resize_x(&mut self, factor: f64) {
        self.pos.x *= factor;
        self.width *= factor;
    }

    fn resize_y(&mut self, factor: f64) {
        self.pos.y *= factor;
        self.length *= factor;
    }
}

impl Resizable for Match {
    fn resize_x(&mut self, factor: f64) {
        self.left.paddle.resize_x(factor);
        self.right.paddle.resize_x(factor);
        self.ball.resize_x(factor);
    }

    fn resize_y(&mut self, factor: f64) {
        self.left.paddle.resize_y(factor);
        self.right.paddle.resize_y(factor);
        self.ball.resize_y(factor);
    }
}

impl Match {
    /// Rescale everything from the current field size to a new one and adopt it.
    /// Non-positive sizes are ignored.
    pub fn fit_to(&mut self, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 || self.width <= 0.0 || self.height <= 0.0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        let scale_x = width / self.width;
        let scale_y = height / self.height;
        self.resize_x(scale_x);
        self.resize_y(scale_y);
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_ball_resize() {
        let mut ball = Ball::new(100.0, 100.0);
        ball.resize_x(2.0);
        ball.resize_y(0.5);
        assert_eq!(ball.pos, DVec2::new(100.0, 25.0));
        assert_eq!(ball.radius, 30.0);
    }

    #[test]
    fn test_paddle_resize() {
        let mut paddle = Paddle::new(200.0);
        paddle.resize_x(2.0);
        paddle.resize_y(2.0);
        assert_eq!(paddle.pos, DVec2::new(40.0, 110.0));
        assert_eq!(paddle.width, 30.0);
        assert_eq!(paddle.length, 180.0);
    }

    #[test]
    fn test_fit_to_scales_from_current_size() {
        let mut state = Match::with_field(1000.0, 500.0);
        let right_x = state.right.paddle.pos.x;

        state.fit_to(2000.0, 250.0);
        assert_eq!((state.width, state.height), (2000.0, 250.0));
        assert_eq!(state.ball.pos, DVec2::new(1000.0, 125.0));
        assert_eq!(state.right.paddle.pos.x, right_x * 2.0);
        assert_eq!(state.left.paddle.length, 45.0);

        state.fit_to(0.0, 100.0);
        assert_eq!((state.width, state.height), (2000.0, 250.0));
    }
}
