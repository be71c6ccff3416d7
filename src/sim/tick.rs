//! Fixed timestep simulation tick
//!
//! Advances the match by one step: ball physics while running, phase timers
//! otherwise. Timed phases count down by `dt`, so tests drive the whole goal
//! and countdown sequence without real waits.

use std::time::Duration;

use super::collision::{
    PaddleContact, goal_scorer, resolve_paddle_collisions, resolve_wall_collision,
};
use super::state::{Match, MatchPhase, Side};
use crate::config::Timings;
use crate::consts::COUNTDOWN_START;

/// Something that happened during a tick, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Match is paused; show the instructional view
    Idle,
    /// Match state changed and should be redrawn
    Frame,
    WallBounce,
    PaddleHit { side: Side, contact: PaddleContact },
    /// A point was scored and the match continues
    Goal { scorer: Side },
    /// Countdown value to show (0 is "Go")
    Countdown(u8),
    /// The match was decided
    Won { winner: Side },
    /// Win delay elapsed; hand control back to navigation
    HandOff,
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut Match, timings: &Timings, dt: Duration) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        MatchPhase::Paused => events.push(GameEvent::Idle),

        MatchPhase::Running => tick_running(state, timings, &mut events),

        MatchPhase::GoalPause { scorer, remaining } => {
            let remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                state.phase = MatchPhase::Countdown {
                    value: COUNTDOWN_START,
                    remaining: timings.countdown_step,
                };
                events.push(GameEvent::Frame);
                events.push(GameEvent::Countdown(COUNTDOWN_START));
            } else {
                state.phase = MatchPhase::GoalPause { scorer, remaining };
            }
        }

        MatchPhase::Countdown { value, remaining } => {
            let remaining = remaining.saturating_sub(dt);
            if !remaining.is_zero() {
                state.phase = MatchPhase::Countdown { value, remaining };
            } else if value == 0 {
                state.phase = MatchPhase::Running;
                events.push(GameEvent::Frame);
            } else {
                state.phase = MatchPhase::Countdown {
                    value: value - 1,
                    remaining: timings.countdown_step,
                };
                events.push(GameEvent::Frame);
                events.push(GameEvent::Countdown(value - 1));
            }
        }

        MatchPhase::Won {
            winner,
            hand_off_in: Some(remaining),
        } => {
            let remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                state.phase = MatchPhase::Won {
                    winner,
                    hand_off_in: None,
                };
                events.push(GameEvent::HandOff);
            } else {
                state.phase = MatchPhase::Won {
                    winner,
                    hand_off_in: Some(remaining),
                };
            }
        }

        // Terminal until reset
        MatchPhase::Won {
            hand_off_in: None, ..
        } => {}
    }

    events
}

fn tick_running(state: &mut Match, timings: &Timings, events: &mut Vec<GameEvent>) {
    state.ball.advance();

    if resolve_wall_collision(&mut state.ball, state.height) {
        events.push(GameEvent::WallBounce);
    }

    // A goal this tick takes precedence over any paddle contact
    if let Some(scorer) = goal_scorer(&state.ball, state.width) {
        score_goal(state, scorer, timings, events);
        return;
    }

    if let Some((side, contact)) =
        resolve_paddle_collisions(&mut state.ball, &state.left.paddle, &state.right.paddle)
    {
        log::debug!(
            "Paddle hit ({}, {:?}), speed now {:.2}",
            side.as_str(),
            contact,
            state.ball.speed
        );
        events.push(GameEvent::PaddleHit { side, contact });
    }

    events.push(GameEvent::Frame);
}

fn score_goal(state: &mut Match, scorer: Side, timings: &Timings, events: &mut Vec<GameEvent>) {
    let player = state.player_mut(scorer);
    player.score_point();
    let score = player.score;
    log::info!(
        "{} scores ({} - {})",
        state.player(scorer).name,
        state.left.score,
        state.right.score
    );

    if score >= state.target_score {
        log::info!("{} wins the match", state.player(scorer).name);
        state.phase = MatchPhase::Won {
            winner: scorer,
            hand_off_in: Some(timings.win_delay),
        };
        events.push(GameEvent::Frame);
        events.push(GameEvent::Won { winner: scorer });
    } else {
        state.reset_for_serve();
        state.phase = MatchPhase::GoalPause {
            scorer,
            remaining: timings.goal_pause,
        };
        events.push(GameEvent::Frame);
        events.push(GameEvent::Goal { scorer });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALL_SPEED, BALL_SPEED_INCREMENT, TICK_INTERVAL};
    use glam::DVec2;

    const DT: Duration = TICK_INTERVAL;

    fn running_match() -> Match {
        let mut state = Match::new();
        state.resume();
        state
    }

    /// Tick until the phase changes, returning how many ticks it took and every event seen
    fn tick_until_phase_changes(state: &mut Match, timings: &Timings) -> (u32, Vec<GameEvent>) {
        let start = std::mem::discriminant(&state.phase);
        let start_value = match state.phase {
            MatchPhase::Countdown { value, .. } => Some(value),
            _ => None,
        };
        let mut all = Vec::new();
        for n in 1..=10_000 {
            all.extend(tick(state, timings, DT));
            let value = match state.phase {
                MatchPhase::Countdown { value, .. } => Some(value),
                _ => None,
            };
            if std::mem::discriminant(&state.phase) != start || value != start_value {
                return (n, all);
            }
        }
        panic!("phase never changed");
    }

    #[test]
    fn test_paused_tick_is_idle() {
        let mut state = Match::new();
        let before = state.ball.pos;
        let events = tick(&mut state, &Timings::default(), DT);
        assert_eq!(events, vec![GameEvent::Idle]);
        assert_eq!(state.ball.pos, before);
    }

    #[test]
    fn test_running_tick_moves_ball() {
        let mut state = running_match();
        let before = state.ball.pos;
        let events = tick(&mut state, &Timings::default(), DT);
        assert_eq!(events, vec![GameEvent::Frame]);
        assert_eq!(state.ball.pos, before + DVec2::splat(BALL_SPEED));
    }

    #[test]
    fn test_wall_bounce_during_tick() {
        let mut state = Match::with_field(600.0, 600.0);
        state.resume();
        state.ball.pos = DVec2::new(300.0, 9.5);
        state.ball.direction = DVec2::new(1.0, -1.0);

        let events = tick(&mut state, &Timings::default(), DT);
        assert_eq!(events, vec![GameEvent::WallBounce, GameEvent::Frame]);
        assert_eq!(state.ball.direction.y, 1.0);
    }

    #[test]
    fn test_paddle_hit_during_tick() {
        let mut state = running_match();
        let paddle = state.left.paddle.clone();
        state.ball.pos = DVec2::new(
            paddle.pos.x + paddle.width + state.ball.radius + 1.0,
            paddle.pos.y + paddle.length / 2.0,
        );
        state.ball.direction = DVec2::new(-1.0, 0.0);

        let events = tick(&mut state, &Timings::default(), DT);
        assert_eq!(
            events,
            vec![
                GameEvent::PaddleHit {
                    side: Side::Left,
                    contact: PaddleContact::Face
                },
                GameEvent::Frame
            ]
        );
        assert_eq!(state.ball.direction.x, 1.0);
        assert!((state.ball.speed - (BALL_SPEED + BALL_SPEED_INCREMENT)).abs() < 1e-9);
    }

    #[test]
    fn test_goal_beats_paddle_contact() {
        let mut state = running_match();
        // Paddle pushed up against the side line so the ball overlaps it while scoring
        state.left.paddle.pos.x = 0.0;
        state.ball.pos = DVec2::new(10.0, state.left.paddle.pos.y + 20.0);
        state.ball.direction = DVec2::new(-1.0, 0.0);

        let events = tick(&mut state, &Timings::default(), DT);
        assert_eq!(state.right.score, 1);
        assert!(events.contains(&GameEvent::Goal { scorer: Side::Right }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::PaddleHit { .. })));
        assert_eq!(state.ball.speed, BALL_SPEED);
    }

    #[test]
    fn test_goal_sequence() {
        let timings = Timings::default();
        let mut state = running_match();
        state.ball.pos = DVec2::new(state.width - 10.5, 300.0);
        state.ball.speed = 5.0;
        state.ball.direction = DVec2::new(1.0, 0.4);
        state.left.paddle.pos.y = 0.0;

        let events = tick(&mut state, &timings, DT);
        assert_eq!(
            events,
            vec![GameEvent::Frame, GameEvent::Goal { scorer: Side::Left }]
        );
        assert_eq!(state.left.score, 1);
        assert!(matches!(
            state.phase,
            MatchPhase::GoalPause {
                scorer: Side::Left,
                ..
            }
        ));
        assert!(!state.is_ball_moving());

        // Serve positions are restored immediately
        assert_eq!(state.ball.pos, DVec2::new(state.width / 2.0, state.height / 2.0));
        assert_eq!(state.ball.speed, BALL_SPEED);
        assert_eq!(state.ball.direction, DVec2::ONE);
        assert_eq!(
            state.left.paddle.pos.y,
            state.height / 2.0 - state.left.paddle.length / 2.0
        );

        // One second of goal pause, then 3, 2, 1, Go one second apart
        let (ticks, events) = tick_until_phase_changes(&mut state, &timings);
        assert_eq!(ticks, 100);
        assert_eq!(events, vec![GameEvent::Frame, GameEvent::Countdown(3)]);

        for expected in [2u8, 1, 0] {
            let (ticks, events) = tick_until_phase_changes(&mut state, &timings);
            assert_eq!(ticks, 100);
            assert_eq!(events, vec![GameEvent::Frame, GameEvent::Countdown(expected)]);
        }

        let (ticks, events) = tick_until_phase_changes(&mut state, &timings);
        assert_eq!(ticks, 100);
        assert_eq!(events, vec![GameEvent::Frame]);
        assert_eq!(state.phase, MatchPhase::Running);
        assert!(state.is_ball_moving());
    }

    #[test]
    fn test_winning_goal_hands_off_once() {
        let timings = Timings::default();
        let mut state = running_match();
        state.target_score = 10;
        state.left.score = 9;
        state.ball.pos = DVec2::new(state.width - 11.0, 300.0);
        state.ball.direction = DVec2::new(1.0, 0.0);

        let events = tick(&mut state, &timings, DT);
        assert_eq!(
            events,
            vec![GameEvent::Frame, GameEvent::Won { winner: Side::Left }]
        );
        assert_eq!(state.left.score, 10);
        assert!(state.is_won());
        assert!(!state.is_ball_moving());

        let mut hand_offs = 0;
        let mut first_hand_off = None;
        for n in 1..=1000 {
            let events = tick(&mut state, &timings, DT);
            let count = events.iter().filter(|e| **e == GameEvent::HandOff).count();
            if count > 0 && first_hand_off.is_none() {
                first_hand_off = Some(n);
            }
            hand_offs += count;
        }
        assert_eq!(hand_offs, 1);
        assert_eq!(first_hand_off, Some(400));
        assert_eq!(
            state.phase,
            MatchPhase::Won {
                winner: Side::Left,
                hand_off_in: None
            }
        );
    }

    #[test]
    fn test_ball_frozen_unless_running() {
        let timings = Timings::default();
        let phases = [
            MatchPhase::Paused,
            MatchPhase::GoalPause {
                scorer: Side::Right,
                remaining: Duration::from_millis(500),
            },
            MatchPhase::Countdown {
                value: 2,
                remaining: Duration::from_millis(500),
            },
            MatchPhase::Won {
                winner: Side::Right,
                hand_off_in: Some(Duration::from_millis(500)),
            },
            MatchPhase::Won {
                winner: Side::Right,
                hand_off_in: None,
            },
        ];

        for phase in phases {
            let mut state = Match::new();
            state.phase = phase;
            let before = state.ball.pos;
            for _ in 0..40 {
                tick(&mut state, &timings, DT);
            }
            assert_eq!(state.ball.pos, before, "ball moved in {}", phase.as_str());
        }
    }

    #[test]
    fn test_pause_during_countdown_then_resume() {
        let timings = Timings::default();
        let mut state = Match::new();
        state.phase = MatchPhase::Countdown {
            value: 1,
            remaining: Duration::from_millis(300),
        };

        assert!(state.pause());
        assert_eq!(tick(&mut state, &timings, DT), vec![GameEvent::Idle]);

        assert!(state.resume());
        assert_eq!(state.phase, MatchPhase::Running);
    }

    #[test]
    fn test_pause_during_goal_pause_skips_countdown() {
        let timings = Timings::default();
        let mut state = running_match();
        state.ball.pos = DVec2::new(state.width - 11.0, 100.0);
        state.ball.direction = DVec2::new(1.0, 0.0);
        tick(&mut state, &timings, DT);
        assert!(matches!(state.phase, MatchPhase::GoalPause { scorer: Side::Left, .. }));
        let served_from = state.ball.pos;

        assert!(!state.resume());
        assert!(state.pause());
        assert_eq!(state.phase, MatchPhase::Paused);
        for _ in 0..200 {
            assert_eq!(tick(&mut state, &timings, DT), vec![GameEvent::Idle]);
        }
        assert_eq!(state.ball.pos, served_from);

        assert!(state.resume());
        assert_eq!(state.phase, MatchPhase::Running);
        assert!(tick(&mut state, &timings, DT).contains(&GameEvent::Frame));
        assert_ne!(state.ball.pos, served_from);
    }

    #[test]
    fn test_zero_delays_advance_next_tick() {
        let timings = Timings {
            goal_pause: Duration::ZERO,
            countdown_step: Duration::ZERO,
            win_delay: Duration::ZERO,
        };
        let mut state = Match::new();
        state.phase = MatchPhase::GoalPause {
            scorer: Side::Left,
            remaining: Duration::ZERO,
        };

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.extend(tick(&mut state, &timings, DT));
        }
        assert_eq!(state.phase, MatchPhase::Running);
        let counts: Vec<u8> = seen
            .iter()
            .filter_map(|e| match e {
                GameEvent::Countdown(n) => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(counts, vec![3, 2, 1, 0]);
    }
}
