//! Game settings
//!
//! Player names, scores, speeds and paddle dimensions that an external loader
//! hands to the core. Reading and writing them to disk is the loader's job; this
//! module only converts between settings, JSON and a live [`Match`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::sim::{PaddleSize, PaddleThickness};
use crate::sim::{Match, Paddle};

/// Settings could not be decoded
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid paddle category {0} (expected 1-3)")]
    InvalidCategory(u8),
}

impl TryFrom<u8> for PaddleSize {
    type Error = SettingsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PaddleSize::Small),
            2 => Ok(PaddleSize::Medium),
            3 => Ok(PaddleSize::Large),
            other => Err(SettingsError::InvalidCategory(other)),
        }
    }
}

impl From<PaddleSize> for u8 {
    fn from(size: PaddleSize) -> Self {
        size as u8
    }
}

impl TryFrom<u8> for PaddleThickness {
    type Error = SettingsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PaddleThickness::Slim),
            2 => Ok(PaddleThickness::Average),
            3 => Ok(PaddleThickness::Thick),
            other => Err(SettingsError::InvalidCategory(other)),
        }
    }
}

impl From<PaddleThickness> for u8 {
    fn from(thickness: PaddleThickness) -> Self {
        thickness as u8
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    // === Players ===
    pub player1_name: String,
    pub player2_name: String,
    pub player1_score: u32,
    pub player2_score: u32,

    // === Ball ===
    /// Serve speed (pixels per tick)
    pub game_speed: f64,
    /// Speed gained on each paddle bounce
    pub speed_increment: f64,

    // === Paddles ===
    pub racket_width: f64,
    pub racket_length: f64,
    pub racket_size: PaddleSize,
    pub racket_thickness: PaddleThickness,

    // === Rules ===
    pub winning_score: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player1_name: "Player 1".to_string(),
            player2_name: "Player 2".to_string(),
            player1_score: 0,
            player2_score: 0,

            game_speed: 1.0,
            speed_increment: 0.1,

            racket_width: 10.0,
            racket_length: 100.0,
            racket_size: PaddleSize::Medium,
            racket_thickness: PaddleThickness::Average,

            winning_score: 21,
        }
    }
}

impl GameSettings {
    /// Parse settings handed over by a loader
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Capture the settings currently in effect. Paddle values come from player 1.
    pub fn from_match(state: &Match) -> Self {
        let paddle = &state.left.paddle;
        Self {
            player1_name: state.left.name.clone(),
            player2_name: state.right.name.clone(),
            player1_score: state.left.score,
            player2_score: state.right.score,
            game_speed: state.ball.base_speed,
            speed_increment: state.ball.speed_increment,
            racket_width: paddle.width,
            racket_length: paddle.length,
            racket_size: paddle.size,
            racket_thickness: paddle.thickness,
            winning_score: state.target_score,
        }
    }

    /// Push these settings into a match. Paddles are kept inside the field.
    pub fn apply_to(&self, state: &mut Match) {
        state.left.name = self.player1_name.clone();
        state.right.name = self.player2_name.clone();
        state.left.score = self.player1_score;
        state.right.score = self.player2_score;

        state.ball.set_base_speed(self.game_speed);
        state.ball.speed_increment = self.speed_increment;

        let height = state.height;
        for paddle in [&mut state.left.paddle, &mut state.right.paddle] {
            self.apply_paddle(paddle, height);
        }
        state.place_right_paddle();

        state.target_score = self.winning_score;
        log::info!(
            "Settings applied: {} vs {}, first to {}",
            self.player1_name,
            self.player2_name,
            self.winning_score
        );
    }

    fn apply_paddle(&self, paddle: &mut Paddle, field_height: f64) {
        paddle.width = self.racket_width;
        paddle.length = self.racket_length;
        paddle.size = self.racket_size;
        paddle.thickness = self.racket_thickness;
        let lower_bound = (field_height - paddle.length).max(0.0);
        paddle.pos.y = paddle.pos.y.clamp(0.0, lower_bound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.player1_name, "Player 1");
        assert_eq!(settings.winning_score, 21);
        assert_eq!(settings.racket_size, PaddleSize::Medium);
        assert_eq!(settings.racket_thickness, PaddleThickness::Average);
    }

    #[test]
    fn test_apply_and_capture() {
        let settings = GameSettings {
            player1_name: "Ada".to_string(),
            player2_name: "Grace".to_string(),
            player1_score: 2,
            player2_score: 5,
            game_speed: 3.0,
            speed_increment: 0.25,
            racket_width: 12.0,
            racket_length: 600.0,
            racket_size: PaddleSize::Large,
            racket_thickness: PaddleThickness::Slim,
            winning_score: 7,
        };

        let mut state = Match::new();
        settings.apply_to(&mut state);

        assert_eq!(state.right.name, "Grace");
        assert_eq!(state.right.score, 5);
        assert_eq!(state.ball.speed, 3.0);
        assert_eq!(state.ball.base_speed, 3.0);
        assert_eq!(state.target_score, 7);
        assert_eq!(state.right.paddle.pos.x, state.width - 12.0 - 20.0);
        // Taller paddle pulled back inside the field
        assert_eq!(state.left.paddle.pos.y, state.height - 600.0);

        assert_eq!(GameSettings::from_match(&state), settings);
    }

    #[test]
    fn test_json() {
        let json = r#"{
            "player1_name": "Ada",
            "racket_size": 3,
            "racket_thickness": 1,
            "winning_score": 5
        }"#;
        let settings = GameSettings::from_json(json).unwrap();
        assert_eq!(settings.player1_name, "Ada");
        assert_eq!(settings.player2_name, "Player 2");
        assert_eq!(settings.racket_size, PaddleSize::Large);
        assert_eq!(settings.racket_thickness, PaddleThickness::Slim);
        assert_eq!(settings.winning_score, 5);

        let encoded = settings.to_json().unwrap();
        assert!(encoded.contains("\"racket_size\":3"));
    }

    #[test]
    fn test_json_rejects_bad_category() {
        let json = r#"{"racket_size":7}"#;
        assert!(matches!(
            GameSettings::from_json(json),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            PaddleSize::try_from(0),
            Err(SettingsError::InvalidCategory(0))
        ));
    }
}
