//! Delayed computer moves.
//!
//! The computer waits a beat before answering so the human sees their own
//! mark land first. Each wait runs in its own task and posts the ticket back
//! to the UI loop, which is the only place the engine is touched.

use std::time::Duration;
use tictactoe_engine::ComputerTurn;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Spawns delayed deliveries of [`ComputerTurn`] tickets.
#[derive(Debug, Clone)]
pub struct ComputerScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<ComputerTurn>,
}

impl ComputerScheduler {
    /// Creates a scheduler and the receiver the UI loop drains.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<ComputerTurn>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { delay, tx }, rx)
    }

    /// How long the computer waits.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Delivers `turn` after the delay. Must be called inside a Tokio runtime.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&self, turn: ComputerTurn) {
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(turn).is_err() {
                debug!("UI loop gone, dropping computer turn");
            }
        });
    }
}
