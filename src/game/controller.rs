//! Owns the live game state and the delayed AI move.
//!
//! Every accepted event replaces the state value and cancels any pending AI
//! timer. When the new state hands the turn to O, a fresh timer is spawned
//! on the tokio runtime; it reports back over a channel tagged with its
//! generation, and `poll` ignores anything that is not the live timer.

use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::ai::RandomAi;
use super::model::{Event, GameState, Status};

pub const DEFAULT_AI_DELAY_MS: u64 = 500;

/// Handle to a scheduled AI move. Dropping it aborts the task.
struct AiTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Drop for AiTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct GameController<R = StdRng> {
    state: GameState,
    ai: RandomAi<R>,
    ai_delay: Duration,
    timer: Option<AiTimer>,
    generation: u64,
    fired_tx: UnboundedSender<u64>,
    fired_rx: UnboundedReceiver<u64>,
}

impl<R: Rng> GameController<R> {
    pub fn new(ai: RandomAi<R>, ai_delay: Duration) -> Self {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        info!(?ai_delay, "New game");
        Self {
            state: GameState::new(),
            ai,
            ai_delay,
            timer: None,
            generation: 0,
            fired_tx,
            fired_rx,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn ai_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Human selects a cell. Ignored when the move is not allowed.
    pub fn click(&mut self, index: usize) {
        self.dispatch(Event::HumanMove(index));
    }

    pub fn reset(&mut self) {
        self.cancel_timer();
        self.dispatch(Event::Reset);
        info!("New game");
    }

    /// Applies any AI move whose delay has elapsed. Returns true if the
    /// state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(generation) = self.fired_rx.try_recv() {
            let live = self
                .timer
                .as_ref()
                .is_some_and(|timer| timer.generation == generation);
            if !live {
                debug!(generation, "Discarding stale AI timer");
                continue;
            }
            self.timer = None;
            changed |= self.play_ai_turn();
        }
        changed
    }

    /// Chooses and applies the AI's move immediately.
    pub fn play_ai_turn(&mut self) -> bool {
        if !self.state.awaiting_ai() {
            return false;
        }
        let choice = self.ai.choose(self.state.board());
        self.dispatch(Event::AiMove(choice))
    }

    fn dispatch(&mut self, event: Event) -> bool {
        let next = self.state.apply(event);
        if next == self.state {
            return false;
        }

        self.cancel_timer();
        self.state = next;
        debug!(?event, status = %next.status(), "Move applied");

        if next.game_over() {
            info!(status = %next.status(), "Game over");
        } else if next.awaiting_ai() {
            self.schedule_ai();
        }
        true
    }

    fn schedule_ai(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let delay = self.ai_delay;
        let fired_tx = self.fired_tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired_tx.send(generation);
        });

        debug!(generation, ?delay, "Scheduled AI move");
        self.timer = Some(AiTimer { generation, handle });
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(generation = timer.generation, "Cancelled AI timer");
        }
    }
}
