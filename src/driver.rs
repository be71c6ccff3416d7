//! Simulation driver thread
//!
//! Ticks the shared match at a fixed interval on its own thread, independent of
//! rendering and input. Each tick runs under the match lock; the resulting render
//! requests are submitted after the lock is released.
//!
//! The wait between ticks is a `recv_deadline` on the stop channel, so stopping
//! wakes the thread immediately instead of waiting out the interval.

use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use thiserror::Error;

use crate::config::SimConfig;
use crate::handle::MatchHandle;
use crate::render::{RenderRequest, RenderSender};
use crate::sim::tick;

/// Driver lifecycle failures
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("simulation thread panicked")]
    Panicked,
}

/// Builds driver threads from a config
#[derive(Debug, Clone, Default)]
pub struct SimulationDriver {
    config: SimConfig,
}

impl SimulationDriver {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Start ticking `state` on a new thread, submitting render requests to `renderer`.
    ///
    /// The config's target score replaces whatever the match was built with.
    pub fn spawn(
        &self,
        state: MatchHandle,
        renderer: RenderSender,
    ) -> Result<DriverHandle, DriverError> {
        let (stop_tx, stop_rx) = bounded(1);
        let config = self.config.clone();
        state.with(|m| m.target_score = config.target_score);

        let thread = thread::Builder::new()
            .name("pong-sim".to_string())
            .spawn(move || run(state, renderer, config, stop_rx))?;

        Ok(DriverHandle {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }
}

/// A running driver. Dropping it stops and joins the thread.
#[derive(Debug)]
pub struct DriverHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<u64>>,
}

impl DriverHandle {
    /// Signal the thread to exit and wait for it. Returns the number of ticks run.
    pub fn stop(mut self) -> Result<u64, DriverError> {
        self.shutdown()
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn shutdown(&mut self) -> Result<u64, DriverError> {
        // Dropping the sender disconnects the channel, which also wakes the thread
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.try_send(());
        }
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| DriverError::Panicked),
            None => Ok(0),
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("Simulation driver shutdown failed: {}", e);
        }
    }
}

fn run(
    state: MatchHandle,
    renderer: RenderSender,
    config: SimConfig,
    stop_rx: Receiver<()>,
) -> u64 {
    let interval = config.tick_interval;
    log::info!("Simulation driver started ({:?} per tick)", interval);

    let mut ticks: u64 = 0;
    let mut next_tick = Instant::now() + interval;

    loop {
        match stop_rx.recv_deadline(next_tick) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        let requests = state.with(|m| {
            let events = tick(m, &config.timings, interval);
            RenderRequest::from_events(&events, m)
        });
        for request in requests {
            renderer.submit(request);
        }
        ticks += 1;

        // Fixed cadence without catch-up bursts: a late tick pushes the schedule back
        next_tick += interval;
        let now = Instant::now();
        if next_tick < now {
            next_tick = now + interval;
        }
    }

    log::info!("Simulation driver stopped after {} ticks", ticks);
    ticks
}
