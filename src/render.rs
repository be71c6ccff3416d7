//! Render request queue and the collaborators it feeds
//!
//! The driver thread never draws. It turns tick events into [`RenderRequest`]s and
//! submits them to an unbounded channel, so the submission never blocks. The
//! rendering domain drains the queue on its own schedule with [`RenderQueue::pump`],
//! which calls the [`RenderSurface`] and [`Navigator`] on that domain's thread.
//!
//! Idle and frame views are dropped once [`VIEW_BACKLOG`] requests are waiting, since
//! each one supersedes the last. Countdown, goal, win and hand-off requests are always
//! queued.

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};

use crate::sim::{Ball, GameEvent, Match, MatchPhase, Paddle, Side};

/// One player as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub side: Side,
    pub name: String,
    pub score: u32,
    pub paddle: Paddle,
}

impl PlayerView {
    pub fn capture(state: &Match, side: Side) -> Self {
        let player = state.player(side);
        Self {
            side,
            name: player.name.clone(),
            score: player.score,
            paddle: player.paddle.clone(),
        }
    }
}

/// Everything needed to draw one frame, copied out from under the match lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub width: f64,
    pub height: f64,
    pub ball: Ball,
    pub left: PlayerView,
    pub right: PlayerView,
    pub target_score: u32,
    pub phase: MatchPhase,
}

impl MatchSnapshot {
    pub fn capture(state: &Match) -> Self {
        Self {
            width: state.width,
            height: state.height,
            ball: state.ball.clone(),
            left: PlayerView::capture(state, Side::Left),
            right: PlayerView::capture(state, Side::Right),
            target_score: state.target_score,
            phase: state.phase,
        }
    }
}

/// A drawing or navigation request for the rendering domain
#[derive(Debug, Clone, PartialEq)]
pub enum RenderRequest {
    /// Instructional view shown while paused
    Idle(MatchSnapshot),
    /// Live game view
    Frame(MatchSnapshot),
    /// Countdown overlay (0 is "Go")
    Countdown(u8),
    Goal(PlayerView),
    Win(PlayerView),
    /// Hand control back to navigation
    MatchWon,
}

impl RenderRequest {
    /// True for whole-field views that a later view fully replaces
    pub fn is_view(&self) -> bool {
        matches!(self, RenderRequest::Idle(_) | RenderRequest::Frame(_))
    }

    /// Translate one tick's events into render requests.
    ///
    /// Takes the snapshot at most once, so call it while still holding the match lock.
    pub fn from_events(events: &[GameEvent], state: &Match) -> Vec<RenderRequest> {
        let mut snapshot: Option<MatchSnapshot> = None;
        let mut requests = Vec::with_capacity(events.len());

        for event in events {
            match *event {
                GameEvent::Idle => {
                    let snap = snapshot.get_or_insert_with(|| MatchSnapshot::capture(state));
                    requests.push(RenderRequest::Idle(snap.clone()));
                }
                GameEvent::Frame => {
                    let snap = snapshot.get_or_insert_with(|| MatchSnapshot::capture(state));
                    requests.push(RenderRequest::Frame(snap.clone()));
                }
                GameEvent::Countdown(value) => requests.push(RenderRequest::Countdown(value)),
                GameEvent::Goal { scorer } => {
                    requests.push(RenderRequest::Goal(PlayerView::capture(state, scorer)))
                }
                GameEvent::Won { winner } => {
                    requests.push(RenderRequest::Win(PlayerView::capture(state, winner)))
                }
                GameEvent::HandOff => requests.push(RenderRequest::MatchWon),
                GameEvent::WallBounce | GameEvent::PaddleHit { .. } => {}
            }
        }

        requests
    }
}

/// The display surface. Called only from the rendering domain.
pub trait RenderSurface {
    fn draw_idle(&mut self, snapshot: &MatchSnapshot);
    fn draw_frame(&mut self, snapshot: &MatchSnapshot);
    fn draw_countdown(&mut self, value: u8);
    fn draw_goal(&mut self, scorer: &PlayerView);
    fn draw_win(&mut self, winner: &PlayerView);
}

/// Screen navigation (back to the menu when a match ends)
pub trait Navigator {
    /// Called once per match, after the win delay
    fn on_match_won(&mut self);
}

/// Pending requests beyond which new idle and frame views are dropped
pub const VIEW_BACKLOG: usize = 100;

/// Create a connected sender / queue pair
pub fn render_channel() -> (RenderSender, RenderQueue) {
    let (sender, receiver) = unbounded();
    (RenderSender { sender }, RenderQueue { receiver })
}

/// Driver side of the render queue
#[derive(Debug, Clone)]
pub struct RenderSender {
    sender: Sender<RenderRequest>,
}

impl RenderSender {
    /// Fire-and-forget submission. Returns false if the request was dropped, either
    /// because the rendering domain has gone away or because it is a view and the
    /// queue is backed up.
    pub fn submit(&self, request: RenderRequest) -> bool {
        if request.is_view() && self.sender.len() >= VIEW_BACKLOG {
            log::trace!("Render queue backed up, dropping view");
            return false;
        }
        match self.sender.send(request) {
            Ok(()) => true,
            Err(_) => {
                log::trace!("Render queue closed, dropping request");
                false
            }
        }
    }
}

/// Rendering-domain side of the queue
#[derive(Debug)]
pub struct RenderQueue {
    receiver: Receiver<RenderRequest>,
}

impl RenderQueue {
    /// Dispatch every pending request. Returns how many were handled.
    pub fn pump(&self, surface: &mut dyn RenderSurface, navigator: &mut dyn Navigator) -> usize {
        let mut handled = 0;
        for request in self.receiver.try_iter() {
            dispatch(request, surface, navigator);
            handled += 1;
        }
        handled
    }

    /// Get number of pending requests
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

/// Route a single request to the matching collaborator call
pub fn dispatch(
    request: RenderRequest,
    surface: &mut dyn RenderSurface,
    navigator: &mut dyn Navigator,
) {
    match request {
        RenderRequest::Idle(snapshot) => surface.draw_idle(&snapshot),
        RenderRequest::Frame(snapshot) => surface.draw_frame(&snapshot),
        RenderRequest::Countdown(value) => surface.draw_countdown(value),
        RenderRequest::Goal(scorer) => surface.draw_goal(&scorer),
        RenderRequest::Win(winner) => surface.draw_win(&winner),
        RenderRequest::MatchWon => navigator.on_match_won(),
    }
}
