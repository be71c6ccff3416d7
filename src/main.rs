//! Rally Pong entry point
//!
//! Headless demo: runs the simulation driver on its own thread, plays both paddles
//! with simple trackers from the input side, and logs what a renderer would draw.

use std::time::{Duration, Instant};

use rally_pong::render::render_channel;
use rally_pong::sim::{Match, PaddleMove, Side};
use rally_pong::{
    Intent, Key, MatchHandle, MatchSnapshot, Navigator, PlayerView, RenderSurface, SimConfig,
    SimulationDriver,
};

/// Renderer stand-in that logs instead of drawing
#[derive(Default)]
struct LogSurface {
    frames: u64,
}

impl RenderSurface for LogSurface {
    fn draw_idle(&mut self, _snapshot: &MatchSnapshot) {}

    fn draw_frame(&mut self, snapshot: &MatchSnapshot) {
        self.frames += 1;
        if self.frames % 100 == 0 {
            log::debug!(
                "frame {}: ball ({:.0}, {:.0}) speed {:.1}",
                self.frames,
                snapshot.ball.pos.x,
                snapshot.ball.pos.y,
                snapshot.ball.speed
            );
        }
    }

    fn draw_countdown(&mut self, value: u8) {
        if value == 0 {
            log::info!("GO!");
        } else {
            log::info!("{}...", value);
        }
    }

    fn draw_goal(&mut self, scorer: &PlayerView) {
        log::info!("GOAL for {} ({})", scorer.name, scorer.score);
    }

    fn draw_win(&mut self, winner: &PlayerView) {
        log::info!("{} WINS with {} points", winner.name, winner.score);
    }
}

#[derive(Default)]
struct MenuNavigator {
    back_to_menu: bool,
}

impl Navigator for MenuNavigator {
    fn on_match_won(&mut self) {
        log::info!("Returning to menu");
        self.back_to_menu = true;
    }
}

/// Tracks the ball with one paddle, one step per `reaction` interval
struct Tracker {
    side: Side,
    reaction: Duration,
    last_move: Instant,
}

impl Tracker {
    fn new(side: Side, reaction: Duration) -> Self {
        Self {
            side,
            reaction,
            last_move: Instant::now(),
        }
    }

    fn intent(&mut self, snapshot: &MatchSnapshot) -> Option<Intent> {
        if self.last_move.elapsed() < self.reaction {
            return None;
        }
        let paddle = match self.side {
            Side::Left => &snapshot.left.paddle,
            Side::Right => &snapshot.right.paddle,
        };
        let center = paddle.pos.y + paddle.length / 2.0;
        let offset = snapshot.ball.pos.y - center;
        if offset.abs() < paddle.length / 4.0 {
            return None;
        }
        self.last_move = Instant::now();
        let direction = if offset < 0.0 { PaddleMove::Up } else { PaddleMove::Down };
        Some(Intent::Move(self.side, direction))
    }
}

fn main() {
    env_logger::init();
    log::info!("Rally Pong (headless) starting...");

    let config = SimConfig::load_or_default();
    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
    let demo_limit = std::env::var("PONG_DEMO_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(120));

    let handle = MatchHandle::new(Match::new());

    let (sender, queue) = render_channel();
    let driver = match SimulationDriver::new(config).spawn(handle.clone(), sender) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut surface = LogSurface::default();
    let mut navigator = MenuNavigator::default();
    let mut trackers = [
        Tracker::new(Side::Left, Duration::from_millis(40)),
        Tracker::new(Side::Right, Duration::from_millis(110)),
    ];

    handle.apply(Key::Enter.intent());
    let started = Instant::now();

    while !navigator.back_to_menu && started.elapsed() < demo_limit {
        queue.pump(&mut surface, &mut navigator);

        let snapshot = handle.snapshot();
        for tracker in &mut trackers {
            if let Some(intent) = tracker.intent(&snapshot) {
                handle.apply(intent);
            }
        }

        std::thread::sleep(Duration::from_millis(16));
    }

    match driver.stop() {
        Ok(ticks) => log::info!("Driver ran {} ticks", ticks),
        Err(e) => log::error!("{}", e),
    }
    let snapshot = handle.snapshot();
    log::info!(
        "Final score: {} {} - {} {}",
        snapshot.left.name,
        snapshot.left.score,
        snapshot.right.score,
        snapshot.right.name
    );
}
